//! Notification fan-out and channel routing.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::adapter::notifier::{ObjectChannelRouter, PatternChannelRouter};
use crate::config::NotificationConfig;
use crate::error::ConfigError;
use crate::port::{ChannelRouter, Notifier, ObjectRouter};

/// Broadcasts messages to every registered notifier and routes symbols,
/// sessions and objects to channel names.
///
/// Notifiers can be added while other threads are notifying. Each call
/// invokes every notifier registered at that moment once, in registration
/// order.
pub struct Notifiability {
    notifiers: RwLock<Vec<Arc<dyn Notifier>>>,
    symbol_router: Box<dyn ChannelRouter>,
    session_router: Box<dyn ChannelRouter>,
    object_router: Box<dyn ObjectRouter>,
}

impl Notifiability {
    /// No notifiers, routers that match nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifiers: RwLock::new(Vec::new()),
            symbol_router: Box::new(PatternChannelRouter::new()),
            session_router: Box::new(PatternChannelRouter::new()),
            object_router: Box::new(ObjectChannelRouter::new()),
        }
    }

    /// Build the symbol and session routers from the `notifications` section.
    pub fn from_config(config: &NotificationConfig) -> Result<Self, ConfigError> {
        let symbol_router =
            PatternChannelRouter::from_map("notifications.symbolChannels", &config.symbol_channels)?;
        let session_router = PatternChannelRouter::from_map(
            "notifications.sessionChannels",
            &config.session_channels,
        )?;

        Ok(Self::new()
            .with_symbol_router(symbol_router)
            .with_session_router(session_router))
    }

    #[must_use]
    pub fn with_symbol_router(mut self, router: impl ChannelRouter + 'static) -> Self {
        self.symbol_router = Box::new(router);
        self
    }

    #[must_use]
    pub fn with_session_router(mut self, router: impl ChannelRouter + 'static) -> Self {
        self.session_router = Box::new(router);
        self
    }

    #[must_use]
    pub fn with_object_router(mut self, router: impl ObjectRouter + 'static) -> Self {
        self.object_router = Box::new(router);
        self
    }

    /// Register a notifier. Later broadcasts include it.
    pub fn add_notifier(&self, notifier: Arc<dyn Notifier>) {
        self.notifiers.write().push(notifier);
    }

    #[must_use]
    pub fn notifier_count(&self) -> usize {
        self.notifiers.read().len()
    }

    #[must_use]
    pub fn route_symbol(&self, symbol: &str) -> Option<&str> {
        self.symbol_router.route(symbol)
    }

    #[must_use]
    pub fn route_session(&self, session: &str) -> Option<&str> {
        self.session_router.route(session)
    }

    #[must_use]
    pub fn route_object(&self, object: &dyn Any) -> Option<String> {
        self.object_router.route_object(object)
    }

    pub fn notify(&self, message: &str) {
        for notifier in self.snapshot() {
            notifier.notify(message);
        }
    }

    pub fn notify_to(&self, channel: &str, message: &str) {
        for notifier in self.snapshot() {
            notifier.notify_to(channel, message);
        }
    }

    /// Copy of the notifier list so no lock is held while notifiers run.
    fn snapshot(&self) -> Vec<Arc<dyn Notifier>> {
        self.notifiers.read().clone()
    }
}

impl Default for Notifiability {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Notifiability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifiability")
            .field("notifiers", &self.notifier_count())
            .finish_non_exhaustive()
    }
}
