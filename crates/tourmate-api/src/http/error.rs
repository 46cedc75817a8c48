//! Fixed error strings and response helpers for the gateway surface.
//!
//! The wire shapes here are a published contract consumed by browser and
//! terminal clients; each endpoint has its own error payload shape, so the
//! mapping lives next to the handlers rather than behind one envelope type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

/// Friendly message for connection-level backend failures.
pub const CANNOT_CONNECT: &str =
    "Cannot connect to backend server. Please ensure it's running.";

/// Generic message for reachable-but-failing backends.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Build a JSON response with an explicit status code.
pub fn json_response(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}
