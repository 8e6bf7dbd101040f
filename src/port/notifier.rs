//! Notifier port for trading notifications.
//!
//! Transports (chat services, mail, logs) implement [`Notifier`]. Routers
//! map symbols, sessions and arbitrary objects to a channel name.

use std::any::Any;

/// Delivers notification messages.
pub trait Notifier: Send + Sync {
    /// Send a message to the transport's default channel.
    ///
    /// This method should return quickly. Slow transports should hand the
    /// message off instead of blocking the caller.
    fn notify(&self, message: &str);

    /// Send a message to a named channel.
    fn notify_to(&self, channel: &str, message: &str);
}

/// Maps a name (symbol or session) to a channel.
pub trait ChannelRouter: Send + Sync {
    fn route(&self, name: &str) -> Option<&str>;
}

/// Maps an arbitrary object (trade, order, report) to a channel.
pub trait ObjectRouter: Send + Sync {
    fn route_object(&self, object: &dyn Any) -> Option<String>;
}
