//! Switchyard core: name-based operation router with interceptors and scheme aggregation.
//!
//! An operation name is a slash-delimited string such as `users/42`. A
//! [`Router`] maps it to an [`Executor`] through an ordered list of routes
//! (`add`, `rewrite`, `with`, `alias`, `service`), after running every
//! matching [`Interceptor`]. [`Router::route_scheme`] aggregates what each
//! route's executor reports about itself.

pub mod context;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod result;
pub mod router;
pub mod schema;
pub mod traits;

pub use context::{new_trace, ExecContext};
pub use error::{RawResponse, RouteError, INTERNAL_CODE, NOT_FOUND_CODE, SUCCESS_CODE};
pub use matcher::{expand_template, Matcher};
pub use registry::ExecutorRegistry;
pub use result::{get_data, get_result, merge_data};
pub use router::{ReqVerifier, RespHandler, Route, Router, RouterBuilder, Target};
pub use schema::{RouteScheme, RouteSchemeItem, Scheme};
pub use traits::{executor_fn, Executor, FnExecutor, FnInterceptor, Interceptor, Runtime};
