use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::core::error::{AppError, Result};

/// Incoming-webhook client for the team chat.
pub struct SlackNotifier {
    client: Client,
    webhook_url: String,
    channel: String,
    record_requests: bool,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    channel: &'a str,
}

impl SlackNotifier {
    pub fn new(webhook_url: String, channel: String, record_requests: bool) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
            channel,
            record_requests,
        }
    }

    /// Post a text message to the configured channel. Fire-and-forget: a
    /// non-2xx response is an error, nothing is retried.
    pub async fn post_message(&self, text: &str) -> Result<()> {
        let payload = WebhookPayload {
            text,
            channel: &self.channel,
        };

        if self.record_requests {
            debug!(
                payload = %serde_json::to_string(&payload)?,
                "Posting webhook message"
            );
        }

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("Webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::delivery(format!(
                "Webhook rejected message {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }
}
