//! The gateway handler: maps HTTP requests under the alias onto the router.
//!
//! Paths, relative to the configured alias:
//! - `__stat` -- application identity
//! - `__scheme` -- the router's aggregated scheme
//! - `<name>.json` -- dispatch `<name>.json` with the JSON body as payload
//!
//! Everything else is a plain 404.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{Extensions, HeaderMap, HeaderValue, Method, Uri};
use axum::response::Response;
use bytes::Bytes;
use serde_json::{json, Value};
use switchyard_core::{new_trace, ExecContext, RouteError};
use tower::ServiceExt;
use tracing::{debug, warn};

use super::envelope::{data_response, error_response, not_found_response, raw_response};
use super::AppState;
use crate::service::Operation;

const TRACE_HEADER: &str = "trace";
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Path segment serving the application identity.
pub const STAT_PATH: &str = "__stat";
/// Path segment serving the aggregated scheme.
pub const SCHEME_PATH: &str = "__scheme";

/// Fallback handler for every request reaching the gateway.
///
/// The operation name is taken from the percent-decoded path; a path that
/// does not decode to UTF-8 is a 404. The peer address is read from
/// [`ConnectInfo`] when the server was started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub async fn gateway_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    extensions: Extensions,
    body: Bytes,
) -> Response {
    let Ok(path) = urlencoding::decode(uri.path()) else {
        debug!(path = uri.path(), "path is not valid UTF-8 after decoding");
        return not_found_response();
    };
    let alias = state.config.normalized_alias();
    let Some(rest) = path.strip_prefix(alias.as_str()) else {
        return not_found_response();
    };

    if rest == STAT_PATH {
        return stat_response(&state);
    }

    if rest == SCHEME_PATH {
        let (trace, generated) = incoming_trace(&headers);
        let ctx = ExecContext::with_trace(SCHEME_PATH, trace.clone(), state.runtime.clone());
        let scheme = state.router.route_scheme(&ctx);
        let response = match serde_json::to_value(scheme) {
            Ok(value) => data_response(value),
            Err(err) => error_response(RouteError::from(anyhow::Error::from(err))),
        };
        return with_trace(response, &trace, generated);
    }

    if !rest.ends_with(".json") {
        return not_found_response();
    }

    let (trace, generated) = incoming_trace(&headers);
    if method == Method::OPTIONS || method == Method::HEAD {
        return with_trace(Response::default(), &trace, generated);
    }

    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let response = dispatch(&state, rest, &trace, &headers, peer, &body).await;
    with_trace(response, &trace, generated)
}

async fn dispatch(
    state: &AppState,
    name: &str,
    trace: &str,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    body: &[u8],
) -> Response {
    let mut ctx = ExecContext::with_trace(name, trace, state.runtime.clone())
        .with_timeout(state.config.operation_timeout());
    ctx.set_value("clientIp", client_ip(headers, peer));

    let payload = decode_payload(body);
    debug!(name = name, trace = trace, "dispatching");

    if let Some(verify) = state.router.match_req_verify(&ctx, name) {
        if let Err(err) = verify(&ctx, name, &payload) {
            debug!(name = name, code = err.code(), "request verification failed");
            return error_response(err);
        }
    }

    let op = Operation {
        ctx: ctx.clone(),
        name: name.to_string(),
        payload,
    };
    match state.pipeline.clone().oneshot(op).await {
        Ok(result) => match state.router.match_resp_handler(&ctx, name) {
            Some(handler) => match handler(&ctx, result) {
                Ok(raw) => raw_response(raw),
                Err(err) => error_response(err),
            },
            None => data_response(result),
        },
        Err(err) => error_response(err),
    }
}

fn stat_response(state: &AppState) -> Response {
    data_response(json!({
        "appid": state.config.app_id,
        "ver": state.config.ver,
        "ability": state.config.ability,
        "env": state.config.env,
    }))
}

/// An empty or non-JSON body decodes to `null`.
fn decode_payload(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!(error = %err, "request body is not valid JSON");
        Value::Null
    })
}

/// Trace id from the `Trace` header, or a new one. The flag is `true` when generated.
fn incoming_trace(headers: &HeaderMap) -> (String, bool) {
    match headers
        .get(TRACE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        Some(trace) => (trace.to_string(), false),
        None => (new_trace(), true),
    }
}

fn with_trace(mut response: Response, trace: &str, generated: bool) -> Response {
    if generated {
        if let Ok(value) = HeaderValue::from_str(trace) {
            response.headers_mut().insert(TRACE_HEADER, value);
        }
    }
    response
}

/// First address of `X-Forwarded-For`, else the peer IP, else empty.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_default()
}
