//! Channel routers built from notification config.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::error::ConfigError;
use crate::port::{ChannelRouter, ObjectRouter};

/// Routes names to channels by regular expression.
///
/// Patterns are tried in insertion order and the first match wins. Patterns
/// are not anchored: `BTC` matches `BTCUSDT`, use `^BTCUSDT$` for an exact
/// match.
#[derive(Debug, Default, Clone)]
pub struct PatternChannelRouter {
    routes: Vec<(Regex, String)>,
}

impl PatternChannelRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from a `pattern -> channel` config map.
    ///
    /// `field` names the config key, used when a pattern fails to compile.
    pub fn from_map(field: &str, patterns: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut router = Self::new();
        for (pattern, channel) in patterns {
            router
                .add_route(pattern, channel.clone())
                .map_err(|e| ConfigError::InvalidValue {
                    field: format!("{field}.{pattern}"),
                    reason: e.to_string(),
                })?;
        }
        Ok(router)
    }

    pub fn add_route(
        &mut self,
        pattern: &str,
        channel: impl Into<String>,
    ) -> Result<(), regex::Error> {
        self.routes.push((Regex::new(pattern)?, channel.into()));
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl ChannelRouter for PatternChannelRouter {
    fn route(&self, name: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|(pattern, _)| pattern.is_match(name))
            .map(|(_, channel)| channel.as_str())
    }
}

type RouteFn = Box<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

/// Routes objects to channels through registered route functions.
///
/// Functions run in registration order; the first one returning a channel
/// wins.
#[derive(Default)]
pub struct ObjectChannelRouter {
    routes: Vec<RouteFn>,
}

impl ObjectChannelRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route<F>(&mut self, route: F)
    where
        F: Fn(&dyn Any) -> Option<String> + Send + Sync + 'static,
    {
        self.routes.push(Box::new(route));
    }

    /// Route every object of type `T` through `route`.
    pub fn add_typed_route<T, F>(&mut self, route: F)
    where
        T: Any,
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.add_route(move |object| object.downcast_ref::<T>().and_then(&route));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl ObjectRouter for ObjectChannelRouter {
    fn route_object(&self, object: &dyn Any) -> Option<String> {
        self.routes.iter().find_map(|route| route(object))
    }
}

impl fmt::Debug for ObjectChannelRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectChannelRouter")
            .field("routes", &self.routes.len())
            .finish()
    }
}
