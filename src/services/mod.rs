//! Business logic services
//!
//! The order wizard state machine, catalog selection, and the notification
//! capability the wizard delivers through.

pub mod catalog_service;
pub mod notification_service;
pub mod order_wizard;
