//! Type-erased view of a config document.
//!
//! The stash keeps the raw YAML tree so sections whose shape is only known
//! at load time (strategy blocks) can be resolved after the fixed schema has
//! been decoded. Mapping keys keep their document order.

use serde::de::Error as _;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Generic parse of a whole config document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stash {
    root: Mapping,
}

impl Stash {
    /// Parse YAML text into a stash.
    ///
    /// An empty document yields an empty stash. The top level must be a
    /// mapping and only a single document is accepted.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut documents = serde_yaml::Deserializer::from_str(content);

        let Some(document) = documents.next() else {
            return Ok(Self::default());
        };
        let value = Value::deserialize(document).map_err(ConfigError::MalformedDocument)?;

        if documents.next().is_some() {
            return Err(ConfigError::MalformedDocument(serde_yaml::Error::custom(
                "expected a single YAML document, found several",
            )));
        }

        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(ConfigError::MalformedDocument(serde_yaml::Error::custom(
                format!("top level must be a mapping, found {}", shape_of(&other)),
            ))),
        }
    }

    /// Wrap an already-built mapping.
    #[must_use]
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Raw value stored under a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Top-level string keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().filter_map(Value::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Human-readable name of a value's shape, used in error messages.
#[must_use]
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
