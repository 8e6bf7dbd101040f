//! Capability traits the core consumes from the outside.

mod notifier;

pub use notifier::{ChannelRouter, Notifier, ObjectRouter};
