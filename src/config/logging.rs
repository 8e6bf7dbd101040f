//! Logging configuration and initialization.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "TRADELOOM_ENV";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Logging settings for the current process.
    ///
    /// `debug` raises the level to `debug`; production deployments
    /// (`TRADELOOM_ENV=production` or `prod`) log JSON lines.
    #[must_use]
    pub fn for_environment(debug: bool) -> Self {
        let environment = std::env::var(ENVIRONMENT_VAR).ok();
        Self::resolve(debug, environment.as_deref())
    }

    fn resolve(debug: bool, environment: Option<&str>) -> Self {
        let level = if debug { "debug" } else { "info" };
        let format = match environment {
            Some("production" | "prod") => "json",
            _ => "pretty",
        };

        Self {
            level: level.into(),
            format: format.into(),
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
