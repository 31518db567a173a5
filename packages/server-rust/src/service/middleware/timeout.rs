//! Timeout middleware for operations.
//!
//! Fails operations whose context deadline passes before the inner service
//! answers. Operations without a deadline are never timed out here.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value;
use switchyard_core::RouteError;
use tower::{Layer, Service};

use crate::service::operation::{status, Operation};

// ---------------------------------------------------------------------------
// TimeoutLayer
// ---------------------------------------------------------------------------

/// Tower layer that enforces each operation's `ctx.deadline`.
#[derive(Debug, Clone)]
pub struct TimeoutLayer;

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService { inner }
    }
}

// ---------------------------------------------------------------------------
// TimeoutService
// ---------------------------------------------------------------------------

/// Service wrapper that enforces per-operation deadlines.
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
}

impl<S> Service<Operation> for TimeoutService<S>
where
    S: Service<Operation, Response = Value, Error = RouteError> + Send,
    S::Future: Send + 'static,
{
    type Response = Value;
    type Error = RouteError;
    type Future = Pin<Box<dyn Future<Output = Result<Value, RouteError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let remaining = op.ctx().remaining();
        let fut = self.inner.call(op);
        Box::pin(async move {
            let Some(duration) = remaining else {
                return fut.await;
            };
            match tokio::time::timeout(duration, fut).await {
                Ok(result) => result,
                Err(_elapsed) => Err(RouteError::status(
                    status::TIMEOUT,
                    format!("operation timed out after {}ms", duration.as_millis()),
                )),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
