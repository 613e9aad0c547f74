//! Message delivery to the Telegram Bot API
//!
//! Delivery is fire-and-forget from the webhook's point of view: a missing
//! bot token or chat id silently disables it, and a failed send is logged
//! but never surfaced to the inbound caller. monday.com must always see a
//! 200 acknowledgment, otherwise it keeps retrying the webhook.

mod telegram;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::TelegramConfig;
use crate::error::{Error, Result};

pub use telegram::{build_status_message, StatusUpdate, EMPTY_FIELD_PLACEHOLDER};
use telegram::SendMessageRequest;

const CLIENT_TIMEOUT_SECS: u64 = 30;

/// Sends formatted messages to a configured Telegram chat
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Application(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Whether delivery is configured
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Deliver a message, swallowing every failure.
    ///
    /// A disabled notifier is a silent no-op; a failed send is warn-logged.
    pub async fn send(&self, text: &str) {
        if !self.is_enabled() {
            debug!("Telegram credentials not configured, skipping delivery");
            return;
        }

        match self.send_message(text).await {
            Ok(()) => debug!("Telegram message delivered"),
            Err(e) => warn!(error = %e, "Failed to deliver Telegram message"),
        }
    }

    async fn send_message(&self, text: &str) -> Result<()> {
        // is_enabled() guards both of these
        let token = self.config.bot_token.as_deref().ok_or_else(|| {
            Error::Application("Telegram bot token not configured".to_string())
        })?;
        let chat_id = self.config.chat_id.as_deref().ok_or_else(|| {
            Error::Application("Telegram chat id not configured".to_string())
        })?;

        let url = format!("{}/bot{}/sendMessage", self.config.api_base, token);
        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode: self.config.parse_mode.clone(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Application(format!(
                "Telegram API returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        Ok(())
    }
}
