//! Telegram bot API gateway
//!
//! Sends the order notification with `sendMessage`. One request per
//! submission, no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TelegramConfig;
use crate::error::DeliveryError;
use crate::infrastructure::http_client;
use crate::models::{DeliveryId, OrderSubmission};
use crate::services::notification_service::{NotificationGateway, format_order_message};

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    result: Option<SentMessage>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

pub struct TelegramGateway {
    config: TelegramConfig,
}

impl TelegramGateway {
    pub fn new(config: TelegramConfig) -> Self {
        Self { config }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.config.api_base, self.config.bot_token)
    }
}

#[async_trait]
impl NotificationGateway for TelegramGateway {
    async fn submit(&self, submission: &OrderSubmission) -> Result<DeliveryId, DeliveryError> {
        let payload = SendMessage {
            chat_id: &self.config.chat_id,
            text: format_order_message(submission),
        };

        // reqwest errors carry the url, which contains the token
        let response = http_client::post_json(&self.send_message_url(), &payload)
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url().to_string()))?;
        let status = response.status();
        let body = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| DeliveryError::MalformedResponse(e.without_url().to_string()))?;

        if !body.ok {
            return Err(DeliveryError::Rejected {
                description: body
                    .description
                    .unwrap_or_else(|| format!("http status {status}")),
            });
        }

        let id = body
            .result
            .map(|sent| DeliveryId(sent.message_id))
            .ok_or_else(|| DeliveryError::MalformedResponse("missing result".to_string()))?;
        tracing::info!(chat_id = %self.config.chat_id, delivery_id = %id, "telegram notification sent");
        Ok(id)
    }
}
