//! Strategy capabilities resolved from config.
//!
//! Strategy implementations live outside this crate. They register their
//! config type under an identifier in a [`Registry`], and the loader turns
//! every matching block of the config document into a boxed instance of that
//! type.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use tradeloom::strategy::{Registries, SingleExchangeStrategy};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Grid {
//!     symbol: String,
//! }
//!
//! impl SingleExchangeStrategy for Grid {
//!     fn id(&self) -> &str {
//!         "grid"
//!     }
//! }
//!
//! let mut registries = Registries::new();
//! registries.single.register::<Grid>("grid");
//! assert!(registries.single.contains("grid"));
//! ```

mod registry;

pub use registry::{Factory, Registries, Registry};

use std::any::Any;
use std::fmt;

use serde::Serialize;

/// Serialization and downcasting shared by every strategy config.
///
/// Blanket-implemented for all `Serialize + 'static` types, so strategy
/// authors never implement it by hand.
pub trait StrategyPayload: Any {
    /// Encode back to the canonical generic form.
    fn to_payload(&self) -> serde_json::Result<serde_json::Value>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Serialize + Any> StrategyPayload for T {
    fn to_payload(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Strategy bound to one or more exchange sessions.
pub trait SingleExchangeStrategy: StrategyPayload + fmt::Debug + Send + Sync {
    /// Identifier the strategy is registered under.
    fn id(&self) -> &str;
}

/// Strategy spanning several sessions on its own terms.
pub trait CrossExchangeStrategy: StrategyPayload + fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
}

impl dyn CrossExchangeStrategy {
    /// Borrow the concrete strategy type.
    #[must_use]
    pub fn downcast_ref<T: CrossExchangeStrategy>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A single-exchange strategy together with the sessions it runs on.
#[derive(Debug)]
pub struct ExchangeStrategyMount {
    /// Session names, in config order without duplicates.
    pub mounts: Vec<String>,
    pub strategy: Box<dyn SingleExchangeStrategy>,
}

impl ExchangeStrategyMount {
    #[must_use]
    pub fn new(mounts: Vec<String>, strategy: Box<dyn SingleExchangeStrategy>) -> Self {
        Self { mounts, strategy }
    }

    #[must_use]
    pub fn is_mounted_on(&self, session: &str) -> bool {
        self.mounts.iter().any(|mount| mount == session)
    }

    /// Borrow the concrete strategy type.
    #[must_use]
    pub fn downcast_ref<T: SingleExchangeStrategy>(&self) -> Option<&T> {
        self.strategy.as_ref().as_any().downcast_ref::<T>()
    }
}
