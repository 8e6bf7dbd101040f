//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the built-in backends.

mod router;

pub use router::{ObjectChannelRouter, PatternChannelRouter};

use tracing::info;

use crate::port::Notifier;

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}

    fn notify_to(&self, _channel: &str, _message: &str) {}
}

/// A logging notifier that emits messages via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(text = message, "Notification");
    }

    fn notify_to(&self, channel: &str, message: &str) {
        info!(channel, text = message, "Notification");
    }
}
