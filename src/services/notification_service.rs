//! Order notification delivery
//!
//! The wizard only knows about the [`NotificationGateway`] capability. The
//! concrete gateway is picked at startup: [`SimulatedGateway`] for local use,
//! or the Telegram client in `infrastructure::telegram_client`.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use crate::error::DeliveryError;
use crate::models::{DeliveryId, OrderSubmission};

/// Delivers a completed order to an external channel
///
/// Each call is exactly one attempt. Callers decide whether to try again.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn submit(&self, submission: &OrderSubmission) -> Result<DeliveryId, DeliveryError>;
}

/// Gateway that waits a fixed delay and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl NotificationGateway for SimulatedGateway {
    async fn submit(&self, submission: &OrderSubmission) -> Result<DeliveryId, DeliveryError> {
        tracing::info!(
            product = %submission.product_name,
            crypto = %submission.crypto_type,
            "simulating order notification"
        );
        tracing::debug!(text = %format_order_message(submission), "notification text");

        tokio::time::sleep(self.delay).await;
        Ok(DeliveryId(Utc::now().timestamp_millis()))
    }
}

/// Human-readable notification text for an order
pub fn format_order_message(submission: &OrderSubmission) -> String {
    let mut text = format!(
        "🔔 New Order Received!\n\nProduct: {}\nName: {}\nEmail: {}\nCrypto: {}\n",
        submission.product_name, submission.name, submission.email, submission.crypto_type
    );
    if let Some(wallet) = submission.wallet_address.as_deref().filter(|w| !w.is_empty()) {
        text.push_str(&format!("Wallet: {wallet}\n"));
    }
    if let Some(message) = submission.message.as_deref().filter(|m| !m.is_empty()) {
        text.push_str(&format!("Message: {message}\n"));
    }
    text
}
