//! Tower middleware layers for the operation pipeline.
//!
//! - [`timeout`]: Per-operation deadline enforcement
//! - [`metrics`]: Dispatch outcome, errno, and timing per operation via `tracing`
//! - [`load_shed`]: tower concurrency limit that sheds instead of queueing
//! - [`pipeline`]: Composes all layers around the router

pub mod load_shed;
pub mod metrics;
pub mod pipeline;
pub mod timeout;

pub use load_shed::LoadShedLayer;
pub use metrics::MetricsLayer;
pub use pipeline::{build_operation_pipeline, OperationPipeline};
pub use timeout::TimeoutLayer;
