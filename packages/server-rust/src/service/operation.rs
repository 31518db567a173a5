//! The request type flowing through the operation pipeline.

use serde_json::Value;
use switchyard_core::ExecContext;

/// A single dispatch: the name to route, its payload, and the call context.
#[derive(Debug, Clone)]
pub struct Operation {
    pub ctx: ExecContext,
    pub name: String,
    pub payload: Value,
}

impl Operation {
    /// Creates an operation whose name is taken from the context.
    #[must_use]
    pub fn new(ctx: ExecContext, payload: Value) -> Self {
        Self {
            name: ctx.name.clone(),
            ctx,
            payload,
        }
    }

    #[must_use]
    pub fn ctx(&self) -> &ExecContext {
        &self.ctx
    }
}

/// Status codes produced by the pipeline layers themselves.
pub mod status {
    /// Returned by the load-shedding layer when no permit is available.
    pub const OVERLOADED: i32 = 503;
    /// Returned by the timeout layer when the context deadline passes.
    pub const TIMEOUT: i32 = 504;
}
