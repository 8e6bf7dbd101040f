//! Concrete implementations of the capability ports.

pub mod notifier;
