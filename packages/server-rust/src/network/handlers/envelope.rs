//! Response envelopes written by the gateway.
//!
//! Successful results are wrapped as `{"errno": 200, "data": ...}`. Errors
//! are written as `{"errno": code, "errmsg": message}` with HTTP 200, except
//! [`RouteError::Raw`], which is written as-is.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use switchyard_core::{RawResponse, RouteError, SUCCESS_CODE};
use tracing::warn;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Wraps `data` in the success envelope.
#[must_use]
pub fn data_response(data: Value) -> Response {
    json_response(&json!({ "errno": SUCCESS_CODE, "data": data }))
}

/// Writes `err` as the error envelope, or verbatim for raw content.
#[must_use]
pub fn error_response(err: RouteError) -> Response {
    match err {
        RouteError::Raw(raw) => raw_response(raw),
        other => json_response(&json!({ "errno": other.code(), "errmsg": other.message() })),
    }
}

/// Converts executor-supplied raw content into an HTTP response.
///
/// Headers that are not valid HTTP are skipped; an invalid status becomes 500.
#[must_use]
pub fn raw_response(raw: RawResponse) -> Response {
    let mut response = Response::new(Body::from(raw.body));
    *response.status_mut() =
        StatusCode::from_u16(raw.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    for (name, value) in raw.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().append(name, value);
            }
            _ => warn!(header = %name, "skipping invalid raw response header"),
        }
    }
    response
}

/// 404 plain-text response for paths outside the gateway.
#[must_use]
pub fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn json_response(body: &Value) -> Response {
    let mut response = Response::new(Body::from(body.to_string()));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}
