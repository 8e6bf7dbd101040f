use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// Every failure a load can produce is a distinct variant so callers can
/// match on the kind instead of parsing messages.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("malformed config document: {0}")]
    MalformedDocument(#[source] serde_yaml::Error),

    #[error("invalid value at {path}: {source}")]
    SchemaDecode {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("expecting a list in {section}, found {found}")]
    MalformedSection {
        section: &'static str,
        found: &'static str,
    },

    #[error("{section} is configured but no strategy type is registered for it")]
    NoExtensionsRegistered { section: &'static str },

    #[error("{section}[{index}]: strategy config should be a mapping, found {found}")]
    MalformedEntry {
        section: &'static str,
        index: usize,
        found: &'static str,
    },

    #[error("{section}[{index}]: failed to decode strategy '{id}', given payload: {payload}")]
    ExtensionDecode {
        section: &'static str,
        index: usize,
        id: String,
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{section}[{index}]: '{id}' is not a registered strategy")]
    UnknownStrategy {
        section: &'static str,
        index: usize,
        id: String,
    },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
