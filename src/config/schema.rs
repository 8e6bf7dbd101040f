//! Fixed top-level config sections.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

use super::stash::shape_of;
use crate::error::ConfigError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decode `value` as `T`. Failures are reported at `path` extended with the
/// position inside `value` where decoding stopped, e.g.
/// `backtest.account.makerCommission` or `reportPnL[1].when`.
pub(crate) fn decode_at<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, ConfigError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let nested = err.path().to_string();
        let path = match nested.as_str() {
            "." => path.to_owned(),
            index if index.starts_with('[') => format!("{path}{index}"),
            field => format!("{path}.{field}"),
        };
        ConfigError::SchemaDecode {
            path,
            source: err.into_inner(),
        }
    })
}

/// One string or a list of strings.
///
/// Accepts both `of: BTCUSDT` and `of: [BTCUSDT, ETHUSDT]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringSlice(Vec<String>);

impl StringSlice {
    #[must_use]
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Read a string slice out of a raw YAML value.
    ///
    /// Returns `None` for any shape other than a string or a list made only
    /// of strings.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(single) => Some(Self(vec![single.clone()])),
            Value::Sequence(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|value| value == needle)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for StringSlice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| {
            D::Error::custom(format!(
                "expected a string or a list of strings, found {}",
                shape_of(&value)
            ))
        })
    }
}

/// Named exchange session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Exchange identifier, e.g. `binance`.
    pub exchange: String,
    /// Prefix of the environment variables holding this session's credentials.
    #[serde(default)]
    pub env_var_prefix: String,
}

/// Backtest window and simulated account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backtest {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub account: BacktestAccount,
    #[serde(default)]
    pub symbols: Vec<String>,
}

impl Backtest {
    /// Parse `startTime` as a `YYYY-MM-DD` date.
    pub fn start_date(&self) -> Result<NaiveDate, ConfigError> {
        parse_date(&self.start_time, "backtest.startTime")
    }

    /// Parse `endTime` as a `YYYY-MM-DD` date.
    pub fn end_date(&self) -> Result<NaiveDate, ConfigError> {
        parse_date(&self.end_time, "backtest.endTime")
    }
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::MissingField { field });
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
    })
}

/// Simulated account used by backtests.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestAccount {
    #[serde(default)]
    pub maker_commission: i64,
    #[serde(default)]
    pub taker_commission: i64,
    #[serde(default)]
    pub buyer_commission: i64,
    #[serde(default)]
    pub seller_commission: i64,
    /// Starting balance per currency.
    #[serde(default)]
    pub balances: BTreeMap<String, Decimal>,
}

impl BacktestAccount {
    /// Starting balances keyed by currency, all funds available.
    #[must_use]
    pub fn balance_map(&self) -> BTreeMap<String, Balance> {
        self.balances
            .iter()
            .map(|(currency, amount)| {
                (
                    currency.clone(),
                    Balance {
                        currency: currency.clone(),
                        available: *amount,
                        locked: Decimal::ZERO,
                    },
                )
            })
            .collect()
    }
}

/// Funds held in one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub currency: String,
    pub available: Decimal,
    pub locked: Decimal,
}

/// Slack channel defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackNotification {
    #[serde(default)]
    pub default_channel: String,
    #[serde(default)]
    pub error_channel: String,
}

/// Channel used for each kind of trading event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRouting {
    #[serde(default)]
    pub trade: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub submit_order: Option<String>,
    #[serde(default, rename = "pnL")]
    pub pnl: Option<String>,
}

/// Notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    #[serde(default)]
    pub slack: Option<SlackNotification>,
    /// Symbol pattern to channel.
    #[serde(default)]
    pub symbol_channels: BTreeMap<String, String>,
    /// Session pattern to channel.
    #[serde(default)]
    pub session_channels: BTreeMap<String, String>,
    #[serde(default)]
    pub routing: Option<NotificationRouting>,
}

/// Risk control settings, kept as raw YAML for the components that own them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RiskControls(Mapping);

impl RiskControls {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Decode one risk control block into a typed struct.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|value| decode_at(value.clone(), &format!("riskControls.{key}")))
            .transpose()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Periodic PnL report settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLReporterConfig {
    #[serde(default)]
    pub average_cost_by_symbols: StringSlice,
    #[serde(default)]
    pub of: StringSlice,
    #[serde(default)]
    pub when: StringSlice,
}
