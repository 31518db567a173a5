//! Operation pipeline between the transport and the router.
//!
//! 1. **Operation** (`operation`): context, name, and payload of one dispatch
//! 2. **Middleware** (`middleware`): Tower layers (load-shedding, timeout, metrics)
//! 3. **Routing** (`router`): the frozen `switchyard_core::Router` as a Tower service

pub mod middleware;
pub mod operation;
pub mod router;

pub use middleware::{build_operation_pipeline, OperationPipeline};
pub use operation::Operation;
pub use router::RouterService;
