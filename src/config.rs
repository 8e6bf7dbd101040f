//! Configuration loading.
//!
//! A config file is a YAML document with a fixed set of top-level sections
//! plus two strategy sections whose entries are typed by whatever strategy
//! implementations registered themselves before the load:
//!
//! ```yaml
//! sessions:
//!   binance:
//!     exchange: binance
//!     envVarPrefix: BINANCE
//!
//! exchangeStrategies:
//! - on: binance
//!   grid:
//!     symbol: BTCUSDT
//! ```
//!
//! The document is parsed once into a [`Stash`]. The fixed sections are
//! decoded from it first, then the strategy sections are resolved against
//! the [`Registries`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::info;

use crate::error::{ConfigError, Result};
use crate::strategy::{CrossExchangeStrategy, ExchangeStrategyMount, Registries};

mod logging;
mod resolver;
mod schema;
mod stash;

use schema::decode_at;

pub use logging::LoggingConfig;
pub use resolver::{
    resolve, LoadOptions, ResolvedStrategies, CROSS_EXCHANGE_STRATEGIES, EXCHANGE_STRATEGIES,
};
pub use schema::{
    Backtest, BacktestAccount, Balance, NotificationConfig, NotificationRouting,
    PnLReporterConfig, RiskControls, Session, SlackNotification, StringSlice,
};
pub use stash::{shape_of, Stash};

/// Fully loaded configuration.
#[derive(Debug, Default)]
pub struct Config {
    /// Modules the embedding program should load before running.
    pub imports: Vec<String>,
    pub backtest: Option<Backtest>,
    pub notifications: Option<NotificationConfig>,
    pub sessions: BTreeMap<String, Session>,
    pub risk_controls: Option<RiskControls>,
    /// Single-exchange strategies in document order.
    pub exchange_strategies: Vec<ExchangeStrategyMount>,
    /// Cross-exchange strategies in document order.
    pub cross_exchange_strategies: Vec<Box<dyn CrossExchangeStrategy>>,
    pub pnl_reporters: Vec<PnLReporterConfig>,
}

impl Config {
    /// Load a config file, resolving strategies leniently.
    pub fn load<P: AsRef<Path>>(path: P, registries: &Registries) -> Result<Self> {
        Self::load_with(path, registries, LoadOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(
        path: P,
        registries: &Registries,
        options: LoadOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config = Self::parse(&content, registries, options)?;
        info!(
            path = %path.display(),
            sessions = config.sessions.len(),
            exchange_strategies = config.exchange_strategies.len(),
            cross_exchange_strategies = config.cross_exchange_strategies.len(),
            "Config loaded"
        );

        Ok(config)
    }

    /// Parse and resolve a config document held in memory.
    pub fn parse(content: &str, registries: &Registries, options: LoadOptions) -> Result<Self> {
        let stash = Stash::parse(content)?;

        let mut config = Self::from_stash(&stash)?;
        let resolved = resolve(&stash, registries, options)?;
        config.exchange_strategies = resolved.exchange;
        config.cross_exchange_strategies = resolved.cross_exchange;

        Ok(config)
    }

    /// Read only the fixed sections of a config file.
    ///
    /// Strategy sections are left untouched, so no registry is needed.
    pub fn preload<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let stash = Stash::parse(&content)?;
        Ok(Self::from_stash(&stash)?)
    }

    /// Decode the fixed sections of a stash.
    pub fn from_stash(stash: &Stash) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            imports: decode_section(stash, "imports")?.unwrap_or_default(),
            backtest: decode_section(stash, "backtest")?,
            notifications: decode_section(stash, "notifications")?,
            sessions: decode_sessions(stash)?,
            risk_controls: decode_section(stash, "riskControls")?,
            exchange_strategies: Vec::new(),
            cross_exchange_strategies: Vec::new(),
            pnl_reporters: decode_section(stash, "reportPnL")?.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn session(&self, name: &str) -> Option<&Session> {
        self.sessions.get(name)
    }

    /// Single-exchange strategies mounted on `session`.
    pub fn strategies_on<'a>(
        &'a self,
        session: &'a str,
    ) -> impl Iterator<Item = &'a ExchangeStrategyMount> + 'a {
        self.exchange_strategies
            .iter()
            .filter(move |mount| mount.is_mounted_on(session))
    }
}

fn decode_section<T: DeserializeOwned>(
    stash: &Stash,
    key: &str,
) -> std::result::Result<Option<T>, ConfigError> {
    match stash.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_at(value.clone(), key).map(Some),
    }
}

/// Sessions are decoded one by one so errors name the offending session.
fn decode_sessions(stash: &Stash) -> std::result::Result<BTreeMap<String, Session>, ConfigError> {
    let raw: BTreeMap<String, Value> = decode_section(stash, "sessions")?.unwrap_or_default();

    raw.into_iter()
        .map(|(name, value)| {
            decode_at::<Session>(value, &format!("sessions.{name}")).map(|session| (name, session))
        })
        .collect()
}
