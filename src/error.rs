//! Error types
//!
//! Wizard failures are always recoverable: they are reported to the visitor
//! and control returns to the form. `AppError` maps them onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::ContactField;

/// Notification delivery failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification transport failed: {0}")]
    Transport(String),

    #[error("notification rejected: {description}")]
    Rejected { description: String },

    #[error("malformed notification response: {0}")]
    MalformedResponse(String),
}

/// Rejected continue action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("missing required fields: {}", join_fields(.missing))]
    Validation { missing: Vec<ContactField> },

    #[error("failed to send order: {0}")]
    Delivery(#[from] DeliveryError),
}

fn join_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown offering {0}")]
    UnknownOffering(u32),

    #[error("another order is already open")]
    WizardAlreadyOpen,

    #[error("no order is open")]
    NoWizardOpen,

    #[error("order is being submitted")]
    SubmissionInFlight,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("{0} is required when NOTIFICATION_MODE=telegram")]
    Missing(&'static str),
}

/// Handler-level error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Wizard(WizardError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Wizard(WizardError::Delivery(_)) => StatusCode::BAD_GATEWAY,
            AppError::Catalog(CatalogError::UnknownOffering(_) | CatalogError::NoWizardOpen) => {
                StatusCode::NOT_FOUND
            }
            AppError::Catalog(
                CatalogError::WizardAlreadyOpen | CatalogError::SubmissionInFlight,
            ) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = match &self {
            AppError::Wizard(WizardError::Validation { missing }) => json!({
                "error": self.to_string(),
                "missing": missing,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
