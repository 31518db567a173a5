//! Switchyard Server — HTTP gateway and operation pipeline around a `switchyard_core::Router`.

pub mod config;
pub mod network;
pub mod service;
pub mod telemetry;

pub use config::{ConfigError, GatewayConfig};
pub use network::{AppState, GatewayModule};
pub use service::{build_operation_pipeline, Operation, OperationPipeline, RouterService};
pub use telemetry::init_tracing;
