//! Cryptlink profile service library
//!
//! A link-in-bio profile page whose offerings open a multi-step order
//! wizard (product, payment, contact, complete). The finished order is sent
//! through a pluggable notification gateway.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{AppError, DeliveryError, WizardError};
pub use models::*;
pub use services::notification_service::NotificationGateway;
pub use services::order_wizard::OrderWizard;
pub use state::AppState;

pub fn create_router(app_state: AppState) -> Router {
    use handlers::*;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/offerings", get(list_offerings))
        .route("/static/icons/{name}", get(icon))
        .route(
            "/wizard",
            get(get_wizard)
                .post(open_wizard)
                .patch(update_wizard)
                .delete(close_wizard),
        )
        .route("/wizard/continue", post(continue_wizard))
        .route("/wizard/back", post(back_wizard))
        .with_state(app_state)
}
