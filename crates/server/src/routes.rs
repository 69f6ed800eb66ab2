use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{auth, deadline, errors::ApiError, openapi, state::AppState};

pub mod services;
pub mod versions;

/// Parse a positive integer path id; anything else is a client error.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(message)),
    }
}

async fn not_found() -> Response {
    ApiError::new(StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Build the application router. Every route, the fallback included, sits
/// behind the API key gate, which sits inside the request deadline.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/:id",
            get(services::get).put(services::update).delete(services::delete),
        )
        .route(
            "/services/:id/versions",
            get(versions::list).post(versions::create),
        )
        .route("/versions/:id", get(versions::get).delete(versions::delete))
        .route("/openapi.json", get(openapi::openapi_json))
        .fallback(not_found);

    api.layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key))
        .layer(middleware::from_fn_with_state(state.clone(), deadline::enforce_deadline))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_accepts_positive_only() {
        assert_eq!(parse_id("42", "bad").unwrap(), 42);
        assert!(parse_id("0", "bad").is_err());
        assert!(parse_id("-3", "bad").is_err());
        assert_eq!(parse_id("abc", "Invalid service ID").unwrap_err().message, "Invalid service ID");
        assert!(parse_id("99999999999", "bad").is_err());
    }
}
