//! Helpers that normalize the result of a downstream call.
//!
//! Downstream services answer with an envelope such as
//! `{"errno": 200, "data": {...}}`. A non-200 `errno` is an error even
//! though the call itself succeeded; these helpers turn it into one.

use serde_json::{Map, Value};

use crate::error::{RouteError, SUCCESS_CODE};

/// Converts an embedded non-success status into an error.
///
/// `Ok(v)` where `v` is an object with an integer `errno` other than 200
/// becomes `RouteError::Status { code: errno, message: errmsg }`. Every other
/// input passes through untouched.
///
/// # Errors
///
/// Returns the incoming error, or the embedded status error.
pub fn get_result(res: Result<Value, RouteError>) -> Result<Value, RouteError> {
    let value = res?;
    if let Some(code) = embedded_errno(&value) {
        if code != SUCCESS_CODE {
            let message = value
                .get("errmsg")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(RouteError::status(code, message));
        }
    }
    Ok(value)
}

/// [`get_result`], then the value under `data` (`Value::Null` when absent).
///
/// # Errors
///
/// Same as [`get_result`].
pub fn get_data(res: Result<Value, RouteError>) -> Result<Value, RouteError> {
    let mut value = get_result(res)?;
    Ok(value
        .as_object_mut()
        .and_then(|obj| obj.remove("data"))
        .unwrap_or(Value::Null))
}

/// [`get_result`], then every entry except `errno` and `errmsg`.
/// Non-object results produce an empty map.
///
/// # Errors
///
/// Same as [`get_result`].
pub fn merge_data(res: Result<Value, RouteError>) -> Result<Map<String, Value>, RouteError> {
    let value = get_result(res)?;
    let Value::Object(obj) = value else {
        return Ok(Map::new());
    };
    Ok(obj
        .into_iter()
        .filter(|(key, _)| key != "errno" && key != "errmsg")
        .collect())
}

fn embedded_errno(value: &Value) -> Option<i32> {
    value
        .get("errno")
        .and_then(Value::as_i64)
        .and_then(|code| i32::try_from(code).ok())
}
