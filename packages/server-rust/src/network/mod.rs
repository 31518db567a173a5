//! HTTP adapter: handler state, handlers, middleware, and router assembly.

pub mod handlers;
pub mod middleware;
pub mod module;

pub use handlers::AppState;
pub use middleware::build_http_layers;
pub use module::GatewayModule;
