//! Response builders for Lambda proxy responses.
//!
//! Every response is `{statusCode, headers, body}` with a JSON string body.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

/// Wraps an already-built JSON body.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns a 200 OK response serializing `payload`.
#[must_use]
pub fn ok_json<T: Serialize>(payload: &T) -> Value {
    match serde_json::to_value(payload) {
        Ok(body) => json_response(200, &body),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            internal_error(&e.to_string())
        }
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Returns a 500 exposing the underlying failure in `details`.
#[must_use]
pub fn internal_error(details: &str) -> Value {
    json_response(
        500,
        &json!({ "error": "Internal server error", "details": details }),
    )
}
