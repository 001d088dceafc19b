//! Router configuration.

use serde::Deserialize;

/// How registered patterns treat a trailing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
    /// `/users` and `/users/` reach the same route.
    #[default]
    Optional,
    /// Patterns are used exactly as composed.
    Strict,
}

/// Settings applied to a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Trailing-slash handling for registered patterns.
    pub trailing_slash: TrailingSlash,
    /// Compile the route table once and reuse it across runs.
    pub cache_routes: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            trailing_slash: TrailingSlash::Optional,
            cache_routes: true,
        }
    }
}
