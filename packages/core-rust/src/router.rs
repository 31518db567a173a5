//! Name-based operation router.
//!
//! Routes are built with a consuming [`RouterBuilder`] and frozen into an
//! immutable [`Router`]. A frozen router can be shared across tasks behind an
//! `Arc`; there is no way to register routes on it after `build()`.
//!
//! Dispatch order:
//! 1. Every interceptor whose pattern is found in the name runs, in
//!    registration order, against the original name. The first error aborts.
//! 2. The first route whose matcher accepts the name executes, with the
//!    transformed name and the original payload.
//! 3. Otherwise the call fails with `404 not found`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::context::ExecContext;
use crate::error::{RawResponse, RouteError};
use crate::matcher::Matcher;
use crate::schema::{RouteScheme, RouteSchemeItem, Scheme};
use crate::traits::{Executor, FnInterceptor, Interceptor};

/// Renders a result into raw HTTP content instead of the JSON envelope.
pub type RespHandler =
    Arc<dyn Fn(&ExecContext, Value) -> Result<RawResponse, RouteError> + Send + Sync>;

/// Checks a request before dispatch. An error rejects the request.
pub type ReqVerifier =
    Arc<dyn Fn(&ExecContext, &str, &Value) -> Result<(), RouteError> + Send + Sync>;

// ---------------------------------------------------------------------------
// Route entries
// ---------------------------------------------------------------------------

/// Where a matched route sends the call.
#[derive(Clone)]
pub enum Target {
    /// An executor bound at registration time.
    Direct(Arc<dyn Executor>),
    /// A service resolved through the context's runtime on every call.
    Service(String),
}

impl Target {
    async fn exec(&self, ctx: &ExecContext, name: &str, data: Value) -> Result<Value, RouteError> {
        match self {
            Self::Direct(executor) => executor.exec(ctx, name, data).await,
            Self::Service(service) => {
                let executor = ctx.runtime.get_executor(service)?;
                executor.exec(ctx, name, data).await
            }
        }
    }

    fn scheme(&self, ctx: &ExecContext) -> Option<Scheme> {
        match self {
            Self::Direct(executor) => executor.scheme(ctx),
            Self::Service(service) => match ctx.runtime.get_executor(service) {
                Ok(executor) => executor.scheme(ctx),
                Err(err) => {
                    debug!(service = %service, error = %err, "service unavailable for scheme");
                    None
                }
            },
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("Direct(..)"),
            Self::Service(name) => f.debug_tuple("Service").field(name).finish(),
        }
    }
}

/// A registered route: matcher, target, and the labels reported in its scheme.
#[derive(Debug, Clone)]
pub struct Route {
    matcher: Matcher,
    target: Target,
    alias: String,
    title: String,
}

struct InterceptorEntry {
    pattern: Regex,
    action: Arc<dyn Interceptor>,
}

// ---------------------------------------------------------------------------
// RouterBuilder
// ---------------------------------------------------------------------------

/// Build-phase router. Every registration consumes and returns the builder.
///
/// ```
/// use switchyard_core::{executor_fn, RouterBuilder};
///
/// let users = executor_fn(|_ctx, name, _data| Ok(name.into()));
/// let router = RouterBuilder::new()
///     .alias("users/", users)
///     .service("pay/", "payment-svc")
///     .build();
/// assert_eq!(router.len(), 2);
/// ```
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
    interceptors: Vec<InterceptorEntry>,
    resp_handlers: HashMap<String, RespHandler>,
    req_verifiers: HashMap<String, ReqVerifier>,
}

impl RouterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, matcher: Matcher, target: Target, alias: String, title: String) -> Self {
        self.routes.push(Route {
            matcher,
            target,
            alias,
            title,
        });
        self
    }

    /// Routes names accepted by `predicate`; the predicate's output is the executor's name.
    #[must_use]
    pub fn add<F>(self, predicate: F, executor: Arc<dyn Executor>) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.push(
            Matcher::Predicate(Arc::new(predicate)),
            Target::Direct(executor),
            String::new(),
            String::new(),
        )
    }

    /// Routes names matching `pattern`, renaming them by expanding `template`
    /// with the captured groups (`{0}` is the whole match, `{1}` the first group).
    #[must_use]
    pub fn rewrite(self, pattern: Regex, template: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        let template = template.into();
        let title = format!("rewrite {} {}", pattern.as_str(), template);
        self.push(
            Matcher::Rewrite { pattern, template },
            Target::Direct(executor),
            String::new(),
            title,
        )
    }

    /// Routes names in which `pattern` is found anywhere, passing the name unchanged.
    #[must_use]
    pub fn with(self, pattern: Regex, executor: Arc<dyn Executor>) -> Self {
        let title = format!("regex {}", pattern.as_str());
        self.push(
            Matcher::Contains(pattern),
            Target::Direct(executor),
            String::new(),
            title,
        )
    }

    /// Routes names starting with `prefix`, stripping it.
    #[must_use]
    pub fn alias(self, prefix: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        let prefix = prefix.into();
        self.push(
            Matcher::Prefix(prefix.clone()),
            Target::Direct(executor),
            prefix,
            String::new(),
        )
    }

    /// Routes names starting with `prefix`, stripping it, to the executor the
    /// context's runtime resolves for `service` at dispatch time.
    #[must_use]
    pub fn service(self, prefix: impl Into<String>, service: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.push(
            Matcher::Prefix(prefix.clone()),
            Target::Service(service.into()),
            prefix,
            String::new(),
        )
    }

    /// Runs `action` before dispatch for every name in which `pattern` is found.
    #[must_use]
    pub fn interceptor(mut self, pattern: Regex, action: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(InterceptorEntry { pattern, action });
        self
    }

    /// [`RouterBuilder::interceptor`] for a synchronous closure.
    #[must_use]
    pub fn interceptor_fn<F>(self, pattern: Regex, action: F) -> Self
    where
        F: Fn(&ExecContext, &str, &Value) -> Result<(), RouteError> + Send + Sync + 'static,
    {
        self.interceptor(pattern, Arc::new(FnInterceptor(action)))
    }

    /// Registers the response handler for the exact name `name`. Last write wins.
    #[must_use]
    pub fn resp_handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ExecContext, Value) -> Result<RawResponse, RouteError> + Send + Sync + 'static,
    {
        self.resp_handlers.insert(name.into(), Arc::new(handler));
        self
    }

    /// Registers the request verifier for the exact name `name`. Last write wins.
    #[must_use]
    pub fn req_verify<F>(mut self, name: impl Into<String>, verifier: F) -> Self
    where
        F: Fn(&ExecContext, &str, &Value) -> Result<(), RouteError> + Send + Sync + 'static,
    {
        self.req_verifiers.insert(name.into(), Arc::new(verifier));
        self
    }

    /// Freezes the registrations into a dispatch table.
    #[must_use]
    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
            interceptors: self.interceptors,
            resp_handlers: self.resp_handlers,
            req_verifiers: self.req_verifiers,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Serve-phase router: an immutable, ordered dispatch table.
pub struct Router {
    routes: Vec<Route>,
    interceptors: Vec<InterceptorEntry>,
    resp_handlers: HashMap<String, RespHandler>,
    req_verifiers: HashMap<String, ReqVerifier>,
}

impl Router {
    /// Shorthand for [`RouterBuilder::new`].
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Dispatches `name` with `data`.
    ///
    /// # Errors
    ///
    /// Returns the first interceptor error, the matched executor's error
    /// (including a failed service lookup), or [`RouteError::not_found`].
    pub async fn exec(&self, ctx: &ExecContext, name: &str, data: Value) -> Result<Value, RouteError> {
        for entry in &self.interceptors {
            if entry.pattern.is_match(name) {
                if let Err(err) = entry.action.intercept(ctx, name, &data).await {
                    debug!(
                        name = name,
                        pattern = entry.pattern.as_str(),
                        code = err.code(),
                        "interceptor rejected call"
                    );
                    return Err(err);
                }
            }
        }

        for route in &self.routes {
            if let Some(dst) = route.matcher.apply(name) {
                debug!(name = name, dst = %dst, matcher = ?route.matcher, "route matched");
                return route.target.exec(ctx, &dst, data).await;
            }
        }

        debug!(name = name, "no route matched");
        Err(RouteError::not_found())
    }

    /// Computes a fresh scheme snapshot: one item per route, in registration order.
    #[must_use]
    pub fn route_scheme(&self, ctx: &ExecContext) -> RouteScheme {
        RouteScheme {
            items: self
                .routes
                .iter()
                .map(|route| RouteSchemeItem {
                    alias: route.alias.clone(),
                    title: route.title.clone(),
                    scheme: route.target.scheme(ctx),
                })
                .collect(),
        }
    }

    /// Response handler registered for exactly `name`.
    #[must_use]
    pub fn match_resp_handler(&self, _ctx: &ExecContext, name: &str) -> Option<RespHandler> {
        self.resp_handlers.get(name).cloned()
    }

    /// Request verifier registered for exactly `name`.
    #[must_use]
    pub fn match_req_verify(&self, _ctx: &ExecContext, name: &str) -> Option<ReqVerifier> {
        self.req_verifiers.get(name).cloned()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("interceptors", &self.interceptors.len())
            .field("resp_handlers", &self.resp_handlers.len())
            .field("req_verifiers", &self.req_verifiers.len())
            .finish()
    }
}

#[async_trait]
impl Executor for Router {
    async fn exec(&self, ctx: &ExecContext, name: &str, data: Value) -> Result<Value, RouteError> {
        Router::exec(self, ctx, name, data).await
    }

    fn scheme(&self, ctx: &ExecContext) -> Option<Scheme> {
        Some(Scheme::Routes(self.route_scheme(ctx)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::registry::ExecutorRegistry;
    use crate::traits::{executor_fn, FnExecutor};

    /// Executor that echoes the name it received and counts its calls.
    struct Recorder {
        tag: &'static str,
        calls: AtomicUsize,
    }

    impl Recorder {
        fn new(tag: &'static str) -> Arc<Self> {
            Arc::new(Self {
                tag,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Executor for Recorder {
        async fn exec(&self, _ctx: &ExecContext, name: &str, data: Value) -> Result<Value, RouteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "by": self.tag, "name": name, "data": data }))
        }

        fn scheme(&self, _ctx: &ExecContext) -> Option<Scheme> {
            Some(Scheme::Custom(json!({ "executor": self.tag })))
        }
    }

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    fn ctx_with(registry: &Arc<ExecutorRegistry>) -> ExecContext {
        ExecContext::new("test", Arc::clone(registry) as Arc<dyn crate::Runtime>)
    }

    #[tokio::test]
    async fn empty_router_returns_not_found() {
        let router = RouterBuilder::new().build();
        let ctx = ExecContext::detached("anything");
        let err = router.exec(&ctx, "anything", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "not found");
    }

    #[tokio::test]
    async fn earlier_route_wins_over_later_overlapping_one() {
        let generic = Recorder::new("generic");
        let specific = Recorder::new("specific");
        let router = RouterBuilder::new()
            .with(re("^users/"), generic.clone())
            .alias("users/", specific.clone())
            .build();

        let ctx = ExecContext::detached("users/42");
        let out = router.exec(&ctx, "users/42", Value::Null).await.unwrap();
        assert_eq!(out["by"], "generic");
        assert_eq!(out["name"], "users/42");
        assert_eq!(generic.calls(), 1);
        assert_eq!(specific.calls(), 0);
    }

    #[tokio::test]
    async fn alias_strips_prefix() {
        let users = Recorder::new("users");
        let router = RouterBuilder::new().alias("users/", users).build();
        let ctx = ExecContext::detached("users/42");
        let out = router.exec(&ctx, "users/42", json!({ "x": 1 })).await.unwrap();
        assert_eq!(out["name"], "42");
        assert_eq!(out["data"], json!({ "x": 1 }));
    }

    #[tokio::test]
    async fn alias_consuming_whole_name_still_matches() {
        let users = Recorder::new("users");
        let fallback = Recorder::new("fallback");
        let router = RouterBuilder::new()
            .alias("users/", users)
            .with(re(""), fallback.clone())
            .build();
        let ctx = ExecContext::detached("users/");
        let out = router.exec(&ctx, "users/", Value::Null).await.unwrap();
        assert_eq!(out["by"], "users");
        assert_eq!(out["name"], "");
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn rewrite_passes_expanded_template() {
        let shop = Recorder::new("shop");
        let router = RouterBuilder::new()
            .rewrite(re(r"^item/(\d+)$"), "shop/{1}", shop)
            .build();
        let ctx = ExecContext::detached("item/7");
        let out = router.exec(&ctx, "item/7", Value::Null).await.unwrap();
        assert_eq!(out["name"], "shop/7");

        let err = router.exec(&ctx, "item/x", Value::Null).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn add_uses_predicate_output() {
        let exec = Recorder::new("pred");
        let router = RouterBuilder::new()
            .add(
                |name| name.strip_suffix(".json").map(str::to_string),
                exec,
            )
            .build();
        let ctx = ExecContext::detached("a/b.json");
        let out = router.exec(&ctx, "a/b.json", Value::Null).await.unwrap();
        assert_eq!(out["name"], "a/b");
    }

    #[tokio::test]
    async fn service_resolves_through_runtime() {
        let payment = Recorder::new("payment");
        let registry = Arc::new(ExecutorRegistry::new());
        registry.register("payment-svc", payment.clone());

        let router = RouterBuilder::new().service("pay/", "payment-svc").build();
        let ctx = ctx_with(&registry);
        let out = router.exec(&ctx, "pay/charge", json!(5)).await.unwrap();
        assert_eq!(out["by"], "payment");
        assert_eq!(out["name"], "charge");
        assert_eq!(out["data"], 5);
        assert_eq!(payment.calls(), 1);
    }

    #[tokio::test]
    async fn service_lookup_failure_is_returned_unchanged() {
        let registry = Arc::new(ExecutorRegistry::new());
        let router = RouterBuilder::new().service("pay/", "payment-svc").build();
        let ctx = ctx_with(&registry);
        let err = router.exec(&ctx, "pay/charge", Value::Null).await.unwrap_err();
        assert!(matches!(err, RouteError::UnknownService { name } if name == "payment-svc"));
    }

    #[tokio::test]
    async fn service_is_resolved_per_call() {
        let registry = Arc::new(ExecutorRegistry::new());
        let router = RouterBuilder::new().service("pay/", "payment-svc").build();
        let ctx = ctx_with(&registry);

        assert!(router.exec(&ctx, "pay/charge", Value::Null).await.is_err());
        registry.register("payment-svc", Recorder::new("late"));
        let out = router.exec(&ctx, "pay/charge", Value::Null).await.unwrap();
        assert_eq!(out["by"], "late");
    }

    #[tokio::test]
    async fn failing_interceptor_stops_dispatch() {
        let target = Recorder::new("a");
        let router = RouterBuilder::new()
            .interceptor_fn(re("^a/"), |_ctx, _name, _data| {
                Err(RouteError::status(403, "forbidden"))
            })
            .alias("a/", target.clone())
            .build();

        let ctx = ExecContext::detached("a/x");
        let err = router.exec(&ctx, "a/x", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), 403);
        assert_eq!(err.message(), "forbidden");
        assert_eq!(target.calls(), 0);
    }

    #[tokio::test]
    async fn all_matching_interceptors_run_in_order_with_original_name() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let first = Arc::clone(&seen);
        let second = Arc::clone(&seen);
        let skipped = Arc::clone(&seen);

        let router = RouterBuilder::new()
            .interceptor_fn(re("a"), move |_ctx, name, _data| {
                first.lock().push(format!("first:{name}"));
                Ok(())
            })
            .interceptor_fn(re("zzz"), move |_ctx, name, _data| {
                skipped.lock().push(format!("skipped:{name}"));
                Ok(())
            })
            .interceptor_fn(re("^a/"), move |_ctx, name, data| {
                second.lock().push(format!("second:{name}:{data}"));
                Ok(())
            })
            .alias("a/", Recorder::new("a"))
            .build();

        let ctx = ExecContext::detached("a/x");
        let out = router.exec(&ctx, "a/x", json!(1)).await.unwrap();
        assert_eq!(out["name"], "x");
        assert_eq!(*seen.lock(), vec!["first:a/x", "second:a/x:1"]);
    }

    #[tokio::test]
    async fn interceptor_error_skips_remaining_interceptors() {
        let later = Arc::new(AtomicUsize::new(0));
        let later_clone = Arc::clone(&later);
        let router = RouterBuilder::new()
            .interceptor_fn(re(""), |_ctx, _name, _data| Err(RouteError::status(401, "login")))
            .interceptor_fn(re(""), move |_ctx, _name, _data| {
                later_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .build();

        let ctx = ExecContext::detached("x");
        let err = router.exec(&ctx, "x", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), 401);
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn interceptors_run_even_when_no_route_matches() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let router = RouterBuilder::new()
            .interceptor_fn(re(""), move |_ctx, _name, _data| {
                hits_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .build();

        let ctx = ExecContext::detached("missing");
        let err = router.exec(&ctx, "missing", Value::Null).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn executor_error_is_propagated_verbatim() {
        let failing = executor_fn(|_ctx, _name, _data| Err(RouteError::status(409, "conflict")));
        let router = RouterBuilder::new().alias("x/", failing).build();
        let ctx = ExecContext::detached("x/y");
        let err = router.exec(&ctx, "x/y", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), 409);
        assert_eq!(err.message(), "conflict");
    }

    #[tokio::test]
    async fn nested_routers_compose() {
        let inner = RouterBuilder::new()
            .alias("list", Recorder::new("inner"))
            .build();
        let outer = RouterBuilder::new().alias("users/", Arc::new(inner)).build();

        let ctx = ExecContext::detached("users/list");
        let out = outer.exec(&ctx, "users/list", Value::Null).await.unwrap();
        assert_eq!(out["by"], "inner");
        assert_eq!(out["name"], "");
    }

    #[test]
    fn scheme_mirrors_routes_in_order() {
        let registry = Arc::new(ExecutorRegistry::new());
        registry.register("payment-svc", Recorder::new("payment"));

        let router = RouterBuilder::new()
            .add(|name| Some(name.to_string()), Recorder::new("any"))
            .rewrite(re(r"^item/(\d+)$"), "shop/{1}", Recorder::new("shop"))
            .with(re("^admin"), Recorder::new("admin"))
            .alias("users/", Recorder::new("users"))
            .service("pay/", "payment-svc")
            .service("gone/", "missing-svc")
            .build();

        let ctx = ctx_with(&registry);
        let scheme = router.route_scheme(&ctx);
        let labels: Vec<(&str, &str)> = scheme
            .items
            .iter()
            .map(|item| (item.alias.as_str(), item.title.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("", ""),
                ("", r"rewrite ^item/(\d+)$ shop/{1}"),
                ("", "regex ^admin"),
                ("users/", ""),
                ("pay/", ""),
                ("gone/", ""),
            ]
        );
        assert_eq!(
            scheme.items[4].scheme,
            Some(Scheme::Custom(json!({ "executor": "payment" })))
        );
        assert_eq!(scheme.items[5].scheme, None);
    }

    #[test]
    fn scheme_is_recomputed_on_every_call() {
        let registry = Arc::new(ExecutorRegistry::new());
        let router = RouterBuilder::new()
            .alias("users/", Recorder::new("users"))
            .service("pay/", "payment-svc")
            .build();
        let ctx = ctx_with(&registry);

        let before = router.route_scheme(&ctx);
        registry.register("payment-svc", Recorder::new("payment"));
        let after = router.route_scheme(&ctx);

        assert_eq!(before.len(), after.len());
        let aliases = |s: &RouteScheme| s.items.iter().map(|i| i.alias.clone()).collect::<Vec<_>>();
        assert_eq!(aliases(&before), aliases(&after));
        assert_eq!(before.items[1].scheme, None);
        assert_eq!(
            after.items[1].scheme,
            Some(Scheme::Custom(json!({ "executor": "payment" })))
        );
    }

    #[test]
    fn router_scheme_nests_as_routes() {
        let inner = RouterBuilder::new().alias("a/", Recorder::new("a")).build();
        let outer = RouterBuilder::new().alias("x/", Arc::new(inner)).build();
        let ctx = ExecContext::detached("__scheme");
        let Some(Scheme::Routes(scheme)) = Executor::scheme(&outer, &ctx) else {
            panic!("router scheme must be Routes");
        };
        assert!(matches!(scheme.items[0].scheme, Some(Scheme::Routes(ref nested)) if nested.len() == 1));
    }

    #[test]
    fn resp_handler_lookup_is_exact() {
        let router = RouterBuilder::new()
            .resp_handler("x", |_ctx, value| Ok(RawResponse::new(201, value.to_string())))
            .build();
        let ctx = ExecContext::detached("x");

        let handler = router.match_resp_handler(&ctx, "x").unwrap();
        let raw = handler(&ctx, json!("ok")).unwrap();
        assert_eq!(raw.status, 201);
        assert_eq!(raw.body, "\"ok\"");

        assert!(router.match_resp_handler(&ctx, "x/").is_none());
        assert!(router.match_resp_handler(&ctx, "y").is_none());
    }

    #[test]
    fn resp_handler_last_registration_wins() {
        let router = RouterBuilder::new()
            .resp_handler("x", |_ctx, _value| Ok(RawResponse::new(201, "")))
            .resp_handler("x", |_ctx, _value| Ok(RawResponse::new(202, "")))
            .build();
        let ctx = ExecContext::detached("x");
        let handler = router.match_resp_handler(&ctx, "x").unwrap();
        assert_eq!(handler(&ctx, Value::Null).unwrap().status, 202);
    }

    #[test]
    fn req_verify_lookup_is_exact() {
        let router = RouterBuilder::new()
            .req_verify("upload.json", |_ctx, _name, data| {
                if data.get("sig").is_some() {
                    Ok(())
                } else {
                    Err(RouteError::status(400, "missing signature"))
                }
            })
            .build();
        let ctx = ExecContext::detached("upload.json");

        let verify = router.match_req_verify(&ctx, "upload.json").unwrap();
        assert!(verify(&ctx, "upload.json", &json!({ "sig": "abc" })).is_ok());
        assert_eq!(verify(&ctx, "upload.json", &json!({})).unwrap_err().code(), 400);
        assert!(router.match_req_verify(&ctx, "upload").is_none());
    }

    #[test]
    fn builder_shorthand_builds_router() {
        let router = Router::builder()
            .alias("a/", Arc::new(FnExecutor::new(
                |_ctx: &ExecContext, name: &str, _data: Value| -> Result<Value, RouteError> {
                    Ok(Value::from(name))
                },
            )))
            .build();
        assert_eq!(router.len(), 1);
        assert!(!router.is_empty());
        assert!(router.match_resp_handler(&ExecContext::detached("a/"), "a/").is_none());
    }
}
