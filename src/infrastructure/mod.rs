//! Infrastructure layer
//!
//! This module contains the external dependencies of the service: the shared
//! HTTP client and the Telegram bot API client.

pub mod http_client;
pub mod telegram_client;
