use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use tracing::warn;

use super::{CrossExchangeStrategy, SingleExchangeStrategy};

/// Decodes canonical JSON payload bytes into a boxed strategy.
pub type Factory<S> = fn(&[u8]) -> Result<Box<S>, serde_json::Error>;

/// Identifier to strategy factory table.
///
/// Filled while the process starts up, then only read. The loader borrows
/// it immutably, so registration cannot race with a load.
pub struct Registry<S: ?Sized> {
    factories: HashMap<String, Factory<S>>,
}

impl<S: ?Sized> Registry<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under `id`.
    ///
    /// A later registration for the same identifier replaces the earlier one.
    pub fn register_factory(&mut self, id: impl Into<String>, factory: Factory<S>) {
        let id = id.into();
        if self.factories.insert(id.clone(), factory).is_some() {
            warn!(id = %id, "Strategy registered twice, keeping the latest registration");
        }
    }

    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Factory<S>> {
        self.factories.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<S: ?Sized> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl Registry<dyn SingleExchangeStrategy> {
    /// Register config type `T` under `id`.
    pub fn register<T>(&mut self, id: impl Into<String>)
    where
        T: SingleExchangeStrategy + DeserializeOwned,
    {
        self.register_factory(id, decode_single::<T>);
    }
}

impl Registry<dyn CrossExchangeStrategy> {
    /// Register config type `T` under `id`.
    pub fn register<T>(&mut self, id: impl Into<String>)
    where
        T: CrossExchangeStrategy + DeserializeOwned,
    {
        self.register_factory(id, decode_cross::<T>);
    }
}

fn decode_single<T>(payload: &[u8]) -> Result<Box<dyn SingleExchangeStrategy>, serde_json::Error>
where
    T: SingleExchangeStrategy + DeserializeOwned,
{
    Ok(Box::new(serde_json::from_slice::<T>(payload)?))
}

fn decode_cross<T>(payload: &[u8]) -> Result<Box<dyn CrossExchangeStrategy>, serde_json::Error>
where
    T: CrossExchangeStrategy + DeserializeOwned,
{
    Ok(Box::new(serde_json::from_slice::<T>(payload)?))
}

/// The two strategy registries consulted by a config load.
///
/// Identifiers are not shared: a single-exchange id is never looked up in
/// the cross-exchange registry and vice versa.
#[derive(Debug, Default)]
pub struct Registries {
    pub single: Registry<dyn SingleExchangeStrategy>,
    pub cross: Registry<dyn CrossExchangeStrategy>,
}

impl Registries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
