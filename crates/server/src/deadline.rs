use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::errors::ApiError;
use crate::state::AppState;

/// Middleware: bound each request by `AppState::request_timeout`.
///
/// On expiry the inner future, and any query it is awaiting, is dropped.
pub async fn enforce_deadline(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    match tokio::time::timeout(state.request_timeout, next.run(req)).await {
        Ok(resp) => resp,
        Err(_) => {
            warn!(%path, timeout_ms = state.request_timeout.as_millis() as u64, "request deadline exceeded");
            ApiError::new(StatusCode::GATEWAY_TIMEOUT, "Request timed out").into_response()
        }
    }
}
