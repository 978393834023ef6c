//! Application state management
//!
//! Shared across all handlers: static catalog and profile data, the visitor's
//! catalog session, the notification gateway, and the template environment.

use minijinja::Environment;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::catalog::{Catalog, Profile};
use crate::config::{Config, NotificationMode, Wallets};
use crate::infrastructure::telegram_client::TelegramGateway;
use crate::models::ContactField;
use crate::services::catalog_service::CatalogSession;
use crate::services::notification_service::{NotificationGateway, SimulatedGateway};

/// Global application state
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub profile: Arc<Profile>,

    /// The single open-wizard slot
    pub session: Arc<Mutex<CatalogSession>>,

    pub gateway: Arc<dyn NotificationGateway>,
    pub required_fields: Arc<[ContactField]>,
    pub wallets: Arc<Wallets>,
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Build state with the gateway selected by configuration
    pub fn new(config: &Config) -> Result<Self, minijinja::Error> {
        let gateway: Arc<dyn NotificationGateway> = match &config.notification {
            NotificationMode::Simulated { delay } => {
                tracing::info!(delay_ms = delay.as_millis() as u64, "using simulated notifications");
                Arc::new(SimulatedGateway::new(*delay))
            }
            NotificationMode::Telegram(telegram) => {
                tracing::info!(chat_id = %telegram.chat_id, "using telegram notifications");
                Arc::new(TelegramGateway::new(telegram.clone()))
            }
        };
        Self::with_gateway(config, gateway)
    }

    pub fn with_gateway(
        config: &Config,
        gateway: Arc<dyn NotificationGateway>,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            catalog: Arc::new(Catalog::builtin()),
            profile: Arc::new(Profile::default()),
            session: Arc::new(Mutex::new(CatalogSession::new())),
            gateway,
            required_fields: config.required_fields.clone().into(),
            wallets: Arc::new(config.wallets.clone()),
            templates: Arc::new(crate::views::environment()?),
        })
    }
}
