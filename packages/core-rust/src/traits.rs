use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::ExecContext;
use crate::error::RouteError;
use crate::schema::Scheme;

/// A capability that executes named operations and describes itself.
///
/// Implemented by leaf handlers, by whole services, and by
/// [`Router`](crate::Router) so routers can be nested.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute operation `name` with `data` as payload.
    async fn exec(&self, ctx: &ExecContext, name: &str, data: Value) -> Result<Value, RouteError>;

    /// Describe the operations this executor accepts. `None` when it has nothing to report.
    fn scheme(&self, ctx: &ExecContext) -> Option<Scheme>;
}

/// Middleware run before route dispatch. Can veto a call, cannot change it.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Returning an error aborts dispatch with that error.
    async fn intercept(&self, ctx: &ExecContext, name: &str, data: &Value) -> Result<(), RouteError>;
}

/// Resolves executors by service name at dispatch time.
pub trait Runtime: Send + Sync {
    /// Looks up the executor registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the runtime uses for a missing or unavailable service.
    fn get_executor(&self, name: &str) -> Result<Arc<dyn Executor>, RouteError>;
}

// ---------------------------------------------------------------------------
// Closure adapters
// ---------------------------------------------------------------------------

/// Adapts a synchronous closure into an [`Executor`].
pub struct FnExecutor<F> {
    f: F,
    scheme: Option<Scheme>,
}

impl<F> FnExecutor<F>
where
    F: Fn(&ExecContext, &str, Value) -> Result<Value, RouteError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f, scheme: None }
    }

    /// Sets the scheme reported by [`Executor::scheme`].
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }
}

#[async_trait]
impl<F> Executor for FnExecutor<F>
where
    F: Fn(&ExecContext, &str, Value) -> Result<Value, RouteError> + Send + Sync,
{
    async fn exec(&self, ctx: &ExecContext, name: &str, data: Value) -> Result<Value, RouteError> {
        (self.f)(ctx, name, data)
    }

    fn scheme(&self, _ctx: &ExecContext) -> Option<Scheme> {
        self.scheme.clone()
    }
}

/// Adapts a synchronous closure into an [`Interceptor`].
pub struct FnInterceptor<F>(pub F);

#[async_trait]
impl<F> Interceptor for FnInterceptor<F>
where
    F: Fn(&ExecContext, &str, &Value) -> Result<(), RouteError> + Send + Sync,
{
    async fn intercept(&self, ctx: &ExecContext, name: &str, data: &Value) -> Result<(), RouteError> {
        (self.0)(ctx, name, data)
    }
}

/// Shorthand for `Arc::new(FnExecutor::new(f))`.
pub fn executor_fn<F>(f: F) -> Arc<dyn Executor>
where
    F: Fn(&ExecContext, &str, Value) -> Result<Value, RouteError> + Send + Sync + 'static,
{
    Arc::new(FnExecutor::new(f))
}
