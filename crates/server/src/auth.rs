use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::errors::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Middleware: require a valid `X-API-Key` on every request.
///
/// Missing or blank header → 401. Unreadable, unknown, or unverifiable key → 403.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let presented = match req.headers().get(API_KEY_HEADER) {
        None => None,
        Some(v) => Some(v.to_str().map(|s| s.trim().to_string())),
    };

    let key = match presented {
        None => return ApiError::unauthorized("API key is missing").into_response(),
        Some(Ok(k)) if k.is_empty() => return ApiError::unauthorized("API key is missing").into_response(),
        Some(Ok(k)) => k,
        Some(Err(_)) => {
            warn!(path = %req.uri().path(), "api key header is not valid text");
            return ApiError::forbidden("Invalid API key").into_response();
        }
    };

    if !state.catalog.authorize(&key).await {
        warn!(path = %req.uri().path(), "rejected request with unknown api key");
        return ApiError::forbidden("Invalid API key").into_response();
    }

    next.run(req).await
}
