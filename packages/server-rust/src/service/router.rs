//! Adapts a frozen `switchyard_core::Router` into a `tower::Service<Operation>`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use serde_json::Value;
use switchyard_core::{RouteError, Router};
use tower::Service;

use super::operation::Operation;

type BoxedFuture = Pin<Box<dyn Future<Output = Result<Value, RouteError>> + Send>>;

// ---------------------------------------------------------------------------
// RouterService
// ---------------------------------------------------------------------------

/// Innermost service of the operation pipeline.
///
/// Always ready: the router holds no per-call state, so every clone shares
/// the same `Arc<Router>` and dispatches independently.
#[derive(Debug, Clone)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }
}

impl Service<Operation> for RouterService {
    type Response = Value;
    type Error = RouteError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let router = Arc::clone(&self.router);
        Box::pin(async move { router.exec(&op.ctx, &op.name, op.payload).await })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
