//! HTTP webhook notifier.
//!
//! Delivers notifications as JSON payloads to a configured webhook URL.
//! The backend acknowledges with HTTP 200; anything else counts as a
//! delivery failure so callers know not to mark records as notified.

use crate::traits::{Notification, Notifier, NotifyError};

/// Delivers notifications as JSON over HTTP POST to a configured endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    /// Target URL. Embeds the webhook secret, so never logged.
    url: String,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    /// Deliver a notification as a JSON payload to the configured webhook URL.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%status, body = %body, "webhook returned non-200 status");
            return Err(NotifyError::Delivery {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(%status, "webhook notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_is_webhook() {
        let notifier = WebhookNotifier::new("https://hooks.example.com/T000/B000/secret");
        assert_eq!(notifier.channel_name(), "webhook");
    }
}
