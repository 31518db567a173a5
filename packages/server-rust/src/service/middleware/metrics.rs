//! Per-operation dispatch records.
//!
//! Every operation runs inside an `operation` span carrying its name, trace,
//! and route group (the first `/` segment of the name). On completion one
//! event reports the dispatch outcome, the `errno` the caller will see, and
//! the elapsed time. Outcomes:
//!
//! | outcome | meaning |
//! |---|---|
//! | `ok` | an executor answered |
//! | `unrouted` | no route matched the name |
//! | `no_service` | a `service` route named a service the runtime lacks |
//! | `rejected` | an interceptor or executor returned a status |
//! | `raw` | the executor answered with raw HTTP content |
//! | `internal` | an executor failed unexpectedly |

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use serde_json::Value;
use switchyard_core::{RouteError, SUCCESS_CODE};
use tower::{Layer, Service};
use tracing::{debug, info_span, warn, Instrument};

use crate::service::operation::Operation;

/// Tower layer recording the dispatch outcome of every operation.
#[derive(Debug, Clone, Copy)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

/// See [`MetricsLayer`].
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

/// Outcome label and `errno` for a dispatch result.
fn classify(result: &Result<Value, RouteError>) -> (&'static str, i32) {
    match result {
        Ok(_) => ("ok", SUCCESS_CODE),
        Err(err) if err.is_not_found() => ("unrouted", err.code()),
        Err(err @ RouteError::UnknownService { .. }) => ("no_service", err.code()),
        Err(err @ RouteError::Status { .. }) => ("rejected", err.code()),
        Err(err @ RouteError::Raw(_)) => ("raw", err.code()),
        Err(err @ RouteError::Internal(_)) => ("internal", err.code()),
    }
}

/// First `/` segment of an operation name: `users/42.json` -> `users`.
fn route_group(name: &str) -> &str {
    name.split('/').next().unwrap_or_default()
}

impl<S> Service<Operation> for MetricsService<S>
where
    S: Service<Operation, Response = Value, Error = RouteError>,
    S::Future: Send + 'static,
{
    type Response = Value;
    type Error = RouteError;
    type Future = Pin<Box<dyn Future<Output = Result<Value, RouteError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let span = info_span!(
            "operation",
            name = %op.name,
            group = route_group(&op.name),
            trace = %op.ctx.trace,
        );
        let started = Instant::now();
        let fut = self.inner.call(op);

        Box::pin(
            async move {
                let result = fut.await;
                let (outcome, errno) = classify(&result);
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                if outcome == "internal" {
                    warn!(outcome, errno, elapsed_ms, "operation failed");
                } else {
                    debug!(outcome, errno, elapsed_ms, "operation complete");
                }
                result
            }
            .instrument(span),
        )
    }
}
