//! Notification delivery for new-sequence summaries.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable notification channels
//! - The webhook notifier used in production
//! - The `Notification` payload posted to the messaging backend

pub mod traits;
pub mod webhook;

pub use traits::{Notification, Notifier, NotifyError};
pub use webhook::WebhookNotifier;
