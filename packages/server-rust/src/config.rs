//! Gateway configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the HTTP gateway in front of a router.
///
/// Controls the URL prefix the gateway answers under, the identity it
/// reports on `__stat`, and the limits of the operation pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// URL prefix for every gateway path. Normalized to end with `/`.
    pub alias: String,
    /// Application identifier reported by `__stat`.
    pub app_id: String,
    /// Application version reported by `__stat`.
    pub ver: String,
    /// Ability (capability set) name reported by `__stat`.
    pub ability: String,
    /// Deployment environment reported by `__stat`.
    pub env: String,
    /// Deadline given to every operation context, in milliseconds.
    pub default_operation_timeout_ms: u64,
    /// Maximum number of concurrent operations before load shedding.
    pub max_concurrent_operations: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            alias: "/".to_string(),
            app_id: String::new(),
            ver: String::new(),
            ability: String::new(),
            env: String::new(),
            default_operation_timeout_ms: 30_000,
            max_concurrent_operations: 1000,
        }
    }
}

/// Errors from validating a [`GatewayConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alias must start with '/': {alias}")]
    AliasNotAbsolute { alias: String },
    #[error("max_concurrent_operations must be greater than zero")]
    NoConcurrency,
    #[error("default_operation_timeout_ms must be greater than zero")]
    NoTimeout,
}

impl GatewayConfig {
    /// Sets the alias, appending a trailing `/` when missing.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = normalize_alias(alias.into());
        self
    }

    /// The alias with a guaranteed trailing `/`.
    #[must_use]
    pub fn normalized_alias(&self) -> String {
        normalize_alias(self.alias.clone())
    }

    /// Per-operation deadline as a `Duration`.
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.default_operation_timeout_ms)
    }

    /// Checks the configuration for values the gateway cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alias.starts_with('/') {
            return Err(ConfigError::AliasNotAbsolute {
                alias: self.alias.clone(),
            });
        }
        if self.max_concurrent_operations == 0 {
            return Err(ConfigError::NoConcurrency);
        }
        if self.default_operation_timeout_ms == 0 {
            return Err(ConfigError::NoTimeout);
        }
        Ok(())
    }
}

fn normalize_alias(mut alias: String) -> String {
    if !alias.ends_with('/') {
        alias.push('/');
    }
    alias
}
