//! Tradeloom - registry-driven trading bot configuration.
//!
//! Loads a single YAML config document into a fully typed [`config::Config`].
//! The fixed sections (sessions, backtest, notifications, risk controls, PnL
//! reports) are decoded directly. The `exchangeStrategies` and
//! `crossExchangeStrategies` sections hold blocks whose type is chosen at
//! load time: each block's key is looked up in a [`strategy::Registry`] and
//! its payload decoded into the type registered under that key.
//!
//! # Modules
//!
//! - [`config`] - Document parsing, fixed sections and strategy resolution
//! - [`strategy`] - Strategy capabilities and registries
//! - [`notification`] - Notifier fan-out and channel routing
//! - [`port`] - Capability traits for notifiers and routers
//! - [`adapter`] - Built-in notifiers and routers
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line front end
//!
//! # Example
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use tradeloom::config::Config;
//! use tradeloom::strategy::{Registries, SingleExchangeStrategy};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Grid {
//!     symbol: String,
//!     grid_number: u32,
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
//!
//! let config = Config::load("config/tradeloom.yaml", &registries)?;
//! for mount in &config.exchange_strategies {
//!     println!("{} on {:?}", mount.strategy.id(), mount.mounts);
//! }
//! # Ok::<(), tradeloom::error::Error>(())
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod error;
pub mod notification;
pub mod port;
pub mod strategy;
