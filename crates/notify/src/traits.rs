//! Notifier trait definition and shared error types.

use serde::Serialize;

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Delivery { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A rendered notification ready for delivery.
///
/// Serializes to the wire shape the messaging backend expects:
/// `{ "text": ..., "header": ..., "filterUrl": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// The message body (capped record dumps).
    pub text: String,
    /// Summary line(s) shown as the thread header.
    pub header: String,
    /// Deep link into the web search UI covering the new records.
    #[serde(rename = "filterUrl")]
    pub filter_url: String,
}

/// Trait for notification channel implementations.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification through this channel.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "webhook").
    fn channel_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_serializes_with_camel_case_filter_url() {
        let notification = Notification {
            text: "body".to_string(),
            header: "1 initial release(s) for mpox".to_string(),
            filter_url: "https://example.org/mpox/search".to_string(),
        };
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["text"], "body");
        assert_eq!(value["header"], "1 initial release(s) for mpox");
        assert_eq!(value["filterUrl"], "https://example.org/mpox/search");
        assert!(value.get("filter_url").is_none());
    }
}
