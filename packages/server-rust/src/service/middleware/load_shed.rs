//! Concurrency limit with load shedding.
//!
//! Built from `tower::limit::ConcurrencyLimit` under `tower::load_shed::LoadShed`:
//! an operation that finds no free permit is not queued but answered with
//! [`status::OVERLOADED`]. Errors from the inner service pass through as the
//! original [`RouteError`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value;
use switchyard_core::RouteError;
use tower::limit::ConcurrencyLimit;
use tower::load_shed::error::Overloaded;
use tower::load_shed::LoadShed;
use tower::{BoxError, Layer, Service};
use tracing::warn;

use crate::service::operation::{status, Operation};

/// Tower layer that caps in-flight operations and sheds the excess.
///
/// One call to [`Layer::layer`] creates one limit; every clone of the
/// resulting service draws from it.
#[derive(Debug, Clone, Copy)]
pub struct LoadShedLayer {
    max_concurrent: usize,
}

impl LoadShedLayer {
    #[must_use]
    pub fn new(max_concurrent: u32) -> Self {
        Self {
            max_concurrent: max_concurrent as usize,
        }
    }
}

impl<S> Layer<S> for LoadShedLayer {
    type Service = LoadShedService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoadShedService {
            inner: LoadShed::new(ConcurrencyLimit::new(inner, self.max_concurrent)),
        }
    }
}

/// Operation service behind the shared concurrency limit.
#[derive(Debug, Clone)]
pub struct LoadShedService<S> {
    inner: LoadShed<ConcurrencyLimit<S>>,
}

impl<S> Service<Operation> for LoadShedService<S>
where
    S: Service<Operation, Response = Value, Error = RouteError>,
    S::Future: Send + 'static,
{
    type Response = Value;
    type Error = RouteError;
    type Future = Pin<Box<dyn Future<Output = Result<Value, RouteError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(into_route_error)
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let name = op.name.clone();
        let fut = self.inner.call(op);
        Box::pin(async move {
            fut.await.map_err(|err| {
                let err = into_route_error(err);
                if err.code() == status::OVERLOADED {
                    warn!(name = %name, "operation shed");
                }
                err
            })
        })
    }
}

/// Recovers the router's error from tower's boxed one.
fn into_route_error(err: BoxError) -> RouteError {
    if err.is::<Overloaded>() {
        return RouteError::status(status::OVERLOADED, "server overloaded, try again later");
    }
    match err.downcast::<RouteError>() {
        Ok(route_err) => *route_err,
        Err(other) => RouteError::Internal(anyhow::anyhow!("{other}")),
    }
}
