//! Outbound chat notifications
//!
//! Delivery is best effort: failures are logged and reported as `false`,
//! never returned as errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::NotifierConfig;
use crate::Result;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `message`, optionally overriding the destination channel.
    ///
    /// Returns whether the message was accepted.
    async fn send(&self, message: &str, channel: Option<&str>) -> bool;
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    username: &'a str,
    icon_emoji: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
}

/// Slack incoming-webhook notifier
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: Client,
    webhook_url: Option<String>,
    default_channel: Option<String>,
    username: String,
    icon_emoji: String,
}

impl SlackNotifier {
    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.webhook_url.is_none() {
            warn!("Notifier webhook URL not configured. Notifications will be disabled.");
        }

        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
            default_channel: config.channel.clone(),
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    fn payload<'a>(&'a self, message: &'a str, channel: Option<&'a str>) -> WebhookPayload<'a> {
        WebhookPayload {
            text: message,
            username: &self.username,
            icon_emoji: &self.icon_emoji,
            channel: channel.or(self.default_channel.as_deref()),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, message: &str, channel: Option<&str>) -> bool {
        let Some(webhook_url) = &self.webhook_url else {
            info!("Notification skipped (webhook URL not configured): {}", message);
            return false;
        };

        let payload = self.payload(message, channel);
        let response = match self.client.post(webhook_url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                error!("Timeout while sending notification: {}", e);
                return false;
            }
            Err(e) if e.is_connect() => {
                error!("Connection error while sending notification: {}", e);
                return false;
            }
            Err(e) => {
                error!("Unexpected error while sending notification: {}", e);
                return false;
            }
        };

        let status = response.status();
        if status.is_success() {
            info!("Notification sent successfully: {}", message);
            true
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("HTTP {} while sending notification: {}", status, body);
            false
        }
    }
}
