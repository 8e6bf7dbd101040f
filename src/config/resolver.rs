//! Resolution of strategy sections against the registries.
//!
//! Each entry of `exchangeStrategies` / `crossExchangeStrategies` is a
//! mapping whose keys name registered strategy types. The payload under a
//! known key is re-encoded as canonical JSON and decoded into the
//! registered type.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::schema::StringSlice;
use super::stash::{shape_of, Stash};
use crate::error::ConfigError;
use crate::strategy::{
    CrossExchangeStrategy, ExchangeStrategyMount, Registries, Registry, SingleExchangeStrategy,
};

pub const EXCHANGE_STRATEGIES: &str = "exchangeStrategies";
pub const CROSS_EXCHANGE_STRATEGIES: &str = "crossExchangeStrategies";

/// Entry key holding the session names a single-exchange strategy runs on.
const MOUNT_KEY: &str = "on";

/// Options controlling strategy resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail on entry keys that are not registered strategy ids instead of
    /// skipping them.
    pub strict: bool,
}

impl LoadOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// Strategies resolved from one document.
#[derive(Debug, Default)]
pub struct ResolvedStrategies {
    pub exchange: Vec<ExchangeStrategyMount>,
    pub cross_exchange: Vec<Box<dyn CrossExchangeStrategy>>,
}

/// Resolve both strategy sections of `stash`.
///
/// Either every entry resolves or an error is returned and nothing is kept.
pub fn resolve(
    stash: &Stash,
    registries: &Registries,
    options: LoadOptions,
) -> Result<ResolvedStrategies, ConfigError> {
    Ok(ResolvedStrategies {
        exchange: resolve_exchange_strategies(stash, &registries.single, options)?,
        cross_exchange: resolve_cross_exchange_strategies(stash, &registries.cross, options)?,
    })
}

fn resolve_exchange_strategies(
    stash: &Stash,
    registry: &Registry<dyn SingleExchangeStrategy>,
    options: LoadOptions,
) -> Result<Vec<ExchangeStrategyMount>, ConfigError> {
    let Some(entries) = section_entries(stash, EXCHANGE_STRATEGIES, registry.is_empty())? else {
        return Ok(Vec::new());
    };

    let mut resolved = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let fields = entry_fields(EXCHANGE_STRATEGIES, index, entry)?;
        let mounts = mounts_of(fields);

        for (id, payload) in strategy_fields(EXCHANGE_STRATEGIES, index, fields, options, |id| {
            registry.contains(id)
        })? {
            let strategy = materialize(registry, EXCHANGE_STRATEGIES, index, id, payload)?;
            debug!(
                section = EXCHANGE_STRATEGIES,
                index,
                id,
                mounts = ?mounts,
                "Resolved strategy"
            );
            resolved.push(ExchangeStrategyMount::new(mounts.clone(), strategy));
        }
    }

    Ok(resolved)
}

fn resolve_cross_exchange_strategies(
    stash: &Stash,
    registry: &Registry<dyn CrossExchangeStrategy>,
    options: LoadOptions,
) -> Result<Vec<Box<dyn CrossExchangeStrategy>>, ConfigError> {
    let Some(entries) = section_entries(stash, CROSS_EXCHANGE_STRATEGIES, registry.is_empty())?
    else {
        return Ok(Vec::new());
    };

    let mut resolved = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let fields = entry_fields(CROSS_EXCHANGE_STRATEGIES, index, entry)?;

        for (id, payload) in
            strategy_fields(CROSS_EXCHANGE_STRATEGIES, index, fields, options, |id| {
                registry.contains(id)
            })?
        {
            let strategy = materialize(registry, CROSS_EXCHANGE_STRATEGIES, index, id, payload)?;
            debug!(section = CROSS_EXCHANGE_STRATEGIES, index, id, "Resolved strategy");
            resolved.push(strategy);
        }
    }

    Ok(resolved)
}

/// Entries of a strategy section, or `None` when the section is absent.
fn section_entries<'a>(
    stash: &'a Stash,
    section: &'static str,
    registry_is_empty: bool,
) -> Result<Option<&'a [Value]>, ConfigError> {
    let Some(value) = stash.get(section) else {
        return Ok(None);
    };

    let Value::Sequence(entries) = value else {
        return Err(ConfigError::MalformedSection {
            section,
            found: shape_of(value),
        });
    };

    if registry_is_empty {
        return Err(ConfigError::NoExtensionsRegistered { section });
    }

    Ok(Some(entries))
}

fn entry_fields<'a>(
    section: &'static str,
    index: usize,
    entry: &'a Value,
) -> Result<&'a Mapping, ConfigError> {
    match entry {
        Value::Mapping(fields) => Ok(fields),
        other => Err(ConfigError::MalformedEntry {
            section,
            index,
            found: shape_of(other),
        }),
    }
}

/// Session names from the `on` key; any shape other than a string or a
/// list of strings mounts nowhere.
fn mounts_of(fields: &Mapping) -> Vec<String> {
    let mounts = fields
        .get(MOUNT_KEY)
        .and_then(StringSlice::from_value)
        .map(StringSlice::into_inner)
        .unwrap_or_default();

    let mut unique: Vec<String> = Vec::with_capacity(mounts.len());
    for mount in mounts {
        if !unique.contains(&mount) {
            unique.push(mount);
        }
    }
    unique
}

/// Registered `(id, payload)` pairs of an entry, in document order.
fn strategy_fields<'a>(
    section: &'static str,
    index: usize,
    fields: &'a Mapping,
    options: LoadOptions,
    is_registered: impl Fn(&str) -> bool,
) -> Result<Vec<(&'a str, &'a Value)>, ConfigError> {
    let mut known = Vec::new();

    for (key, payload) in fields {
        let id = match key.as_str() {
            Some(MOUNT_KEY) => continue,
            Some(id) if is_registered(id) => id,
            _ => {
                let id = key_label(key);
                if options.strict {
                    return Err(ConfigError::UnknownStrategy { section, index, id });
                }
                debug!(section, index, id = %id, "Skipping unregistered strategy key");
                continue;
            }
        };
        known.push((id, payload));
    }

    Ok(known)
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(id) => id.clone(),
        other => serde_yaml::to_string(other)
            .map(|rendered| rendered.trim_end().to_owned())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Re-encode a generic payload as canonical JSON and decode it with the
/// factory registered for `id`.
///
/// A null payload (`grid:` with nothing after it) decodes like an empty
/// mapping so strategies with all-default fields need no body.
fn materialize<S: ?Sized>(
    registry: &Registry<S>,
    section: &'static str,
    index: usize,
    id: &str,
    payload: &Value,
) -> Result<Box<S>, ConfigError> {
    let Some(factory) = registry.lookup(id) else {
        // strategy_fields only yields registered ids
        return Err(ConfigError::UnknownStrategy {
            section,
            index,
            id: id.to_owned(),
        });
    };

    let empty = Value::Mapping(Mapping::new());
    let payload = if payload.is_null() { &empty } else { payload };

    let bytes = serde_json::to_vec(payload).map_err(|source| ConfigError::ExtensionDecode {
        section,
        index,
        id: id.to_owned(),
        payload: key_label(payload),
        source,
    })?;

    factory(&bytes).map_err(|source| ConfigError::ExtensionDecode {
        section,
        index,
        id: id.to_owned(),
        payload: String::from_utf8_lossy(&bytes).into_owned(),
        source,
    })
}
