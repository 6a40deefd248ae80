//! Notification delivery
//!
//! One production channel: the Telegram Bot API
//! (`POST /bot<token>/sendMessage`). Delivery is fire-and-forget from the
//! watcher's point of view; a failed send is reported, never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Delivery failure, carrying the message that never arrived
#[derive(Debug, Error)]
#[error("failed to deliver notification: {reason}")]
pub struct DeliveryError {
    /// Message text that failed to send
    pub message: String,

    /// What the messaging API said went wrong
    pub reason: String,
}

/// Channel that can deliver a notification text
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message. No internal retry.
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Telegram Bot API notification channel
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: Client,
}

impl TelegramNotifier {
    /// Creates a notifier for the given bot token and chat.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError {
                message: text.to_string(),
                reason: format!("telegram request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError {
                message: text.to_string(),
                reason: format!("telegram sendMessage failed: {status} - {body}"),
            });
        }

        debug!(chat_id = %self.chat_id, "notification delivered");
        Ok(())
    }
}
