//! HTTP handler definitions for the gateway.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports the handler functions used when building the
//! router.

pub mod envelope;
pub mod gateway;

pub use envelope::{data_response, error_response, raw_response};
pub use gateway::{gateway_handler, SCHEME_PATH, STAT_PATH};

use std::sync::Arc;

use switchyard_core::{Router, Runtime};

use crate::config::GatewayConfig;
use crate::service::OperationPipeline;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Frozen dispatch table, used for scheme and lookup-table access.
    pub router: Arc<Router>,
    /// Operation pipeline wrapping the same router.
    pub pipeline: OperationPipeline,
    /// Runtime placed on every context to resolve `service` routes.
    pub runtime: Arc<dyn Runtime>,
    /// Gateway configuration (alias, identity, limits).
    pub config: Arc<GatewayConfig>,
}
