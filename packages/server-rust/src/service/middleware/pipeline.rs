//! Pipeline composition: combines all middleware layers into a single service stack.

use std::sync::Arc;

use switchyard_core::Router;
use tower::ServiceBuilder;

use super::load_shed::{LoadShedLayer, LoadShedService};
use super::metrics::{MetricsLayer, MetricsService};
use super::timeout::{TimeoutLayer, TimeoutService};
use crate::config::GatewayConfig;
use crate::service::router::RouterService;

/// The concrete service stack produced by [`build_operation_pipeline`].
///
/// Named rather than boxed so it stays `Clone + Send + Sync` and can live in
/// shared handler state.
pub type OperationPipeline = LoadShedService<TimeoutService<MetricsService<RouterService>>>;

/// Build the operation pipeline by wrapping the router with middleware layers.
///
/// Layer order (outermost to innermost):
/// 1. `LoadShedLayer` -- reject when overloaded (fail fast before doing any work)
/// 2. `TimeoutLayer` -- enforce the context deadline
/// 3. `MetricsLayer` -- record timing and outcome (closest to the router)
#[must_use]
pub fn build_operation_pipeline(router: Arc<Router>, config: &GatewayConfig) -> OperationPipeline {
    ServiceBuilder::new()
        .layer(LoadShedLayer::new(config.max_concurrent_operations))
        .layer(TimeoutLayer)
        .layer(MetricsLayer)
        .service(RouterService::new(router))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
