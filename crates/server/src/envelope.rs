//! Envelope responses: every body is `{code, data, error, success}` JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Envelope;
use serde::Serialize;

/// Write `data`/`error` wrapped in the envelope with `status`.
pub fn write_json<T: Serialize>(status: StatusCode, data: Option<T>, error: &str) -> Response {
    (status, Json(Envelope::new(status.as_u16(), data, error))).into_response()
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(Envelope::ok(StatusCode::OK.as_u16(), data))).into_response()
}

/// Failure with `data: null`.
pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(Envelope::error(status.as_u16(), message))).into_response()
}

/// Success without a payload (`data: null`).
pub fn empty(status: StatusCode) -> Response {
    write_json::<()>(status, None, "")
}
