use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Self-description of an executor, used for discovery and introspection.
///
/// Serializes untagged, so a nested router's scheme appears as
/// `{"items": [...]}` and a custom scheme as its raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scheme {
    /// The aggregated scheme of a router.
    Routes(RouteScheme),
    /// Executor-defined descriptor.
    Custom(Value),
}

/// Aggregated scheme of a router: one item per registered route, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteScheme {
    pub items: Vec<RouteSchemeItem>,
}

/// Scheme of a single route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSchemeItem {
    /// Prefix stripped by `alias`/`service` routes; empty for the other kinds.
    pub alias: String,
    /// Human-readable description of the matcher, e.g. `regex ^user/`.
    pub title: String,
    /// Scheme reported by the route's executor at the time of the call.
    pub scheme: Option<Scheme>,
}

impl RouteScheme {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
