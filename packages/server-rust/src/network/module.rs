//! Gateway module: assembles the axum router in front of a `switchyard_core::Router`.
//!
//! The module never binds a listener. The transport that owns the socket
//! takes [`GatewayModule::build_router`] and serves it however it chooses.

use std::sync::Arc;

use axum::Router as HttpRouter;
use switchyard_core::{Router, Runtime};
use tracing::info;

use super::handlers::{gateway_handler, AppState};
use super::middleware::build_http_layers;
use crate::config::{ConfigError, GatewayConfig};
use crate::service::build_operation_pipeline;

/// Owns the frozen router, the runtime, and the gateway configuration.
pub struct GatewayModule {
    config: Arc<GatewayConfig>,
    router: Arc<Router>,
    runtime: Arc<dyn Runtime>,
}

impl GatewayModule {
    /// Validates `config` and takes ownership of the dispatch table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is unusable.
    pub fn new(
        config: GatewayConfig,
        router: Arc<Router>,
        runtime: Arc<dyn Runtime>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            router,
            runtime,
        })
    }

    /// Assembles the axum router with the gateway fallback and HTTP middleware.
    ///
    /// Every path is handled by [`gateway_handler`], which dispatches on the
    /// path relative to the configured alias. Serve it with
    /// `into_make_service_with_connect_info::<SocketAddr>()` so `clientIp`
    /// falls back to the peer address.
    pub fn build_router(&self) -> HttpRouter {
        let state = AppState {
            router: Arc::clone(&self.router),
            pipeline: build_operation_pipeline(Arc::clone(&self.router), &self.config),
            runtime: Arc::clone(&self.runtime),
            config: Arc::clone(&self.config),
        };

        info!(
            alias = %self.config.normalized_alias(),
            routes = self.router.len(),
            max_concurrent_operations = self.config.max_concurrent_operations,
            "gateway router assembled"
        );

        HttpRouter::new()
            .fallback(gateway_handler)
            .layer(build_http_layers())
            .with_state(state)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
