//! Error type shared by executors, interceptors, and the router.
//!
//! Every error carries a numeric status (`errno`) and a message (`errmsg`),
//! which is the pair the transport layer serializes. Status `200` is the
//! success code and is never used for an error.

use bytes::Bytes;

/// Canonical success status embedded in downstream results.
pub const SUCCESS_CODE: i32 = 200;

/// Status used for routes and services that do not exist.
pub const NOT_FOUND_CODE: i32 = 404;

/// Status used for errors that carry no status of their own.
pub const INTERNAL_CODE: i32 = 500;

/// Raw HTTP content produced by a route instead of the JSON envelope.
///
/// Returned by response handlers, or wrapped in [`RouteError::Raw`] when an
/// executor needs full control over the failure response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Headers written verbatim, in order.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a response with the given status and body and no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Errors produced while dispatching an operation.
///
/// The router never wraps or downgrades these: whatever an interceptor,
/// executor, or runtime lookup returns reaches the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// A status/message pair, e.g. `404 not found` or an interceptor veto.
    #[error("{message}")]
    Status { code: i32, message: String },
    /// The runtime has no executor registered under `name`.
    #[error("service not found: {name}")]
    UnknownService { name: String },
    /// Raw HTTP content to be written as-is by the transport.
    #[error("raw response with status {}", .0.status)]
    Raw(RawResponse),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RouteError {
    /// Builds a status error.
    pub fn status(code: i32, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// The canonical error returned when no route matches a name.
    #[must_use]
    pub fn not_found() -> Self {
        Self::status(NOT_FOUND_CODE, "not found")
    }

    /// The `errno` this error serializes with.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Status { code, .. } => *code,
            Self::UnknownService { .. } => NOT_FOUND_CODE,
            Self::Raw(raw) => i32::from(raw.status),
            Self::Internal(_) => INTERNAL_CODE,
        }
    }

    /// The `errmsg` this error serializes with.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Internal(err) => err.to_string(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for the canonical not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code, .. } if *code == NOT_FOUND_CODE)
    }
}
