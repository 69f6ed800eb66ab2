use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::envelope;

pub const PARTIAL_CREATE_MESSAGE: &str = "Service created but failed to add version";

/// Handler failure rendered as an error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }
    pub fn not_found(message: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, message) }
    pub fn unauthorized(message: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, message) }
    pub fn forbidden(message: impl Into<String>) -> Self { Self::new(StatusCode::FORBIDDEN, message) }

    /// Map a service-layer failure. Storage details are logged and replaced
    /// by `fallback` so internals never reach the client.
    pub fn from_service(err: ServiceError, fallback: &str) -> Self {
        if err.is_validation() {
            return Self::bad_request(err.to_string());
        }
        match err {
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::PartialCreate { service_id, source } => {
                error!(service_id, error = %source, "initial version insert failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, PARTIAL_CREATE_MESSAGE)
            }
            other => {
                error!(error = %other, "{fallback}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        envelope::error(self.status, &self.message)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("schema bootstrap failed: {0}")]
    Schema(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn maps_service_errors_to_status() {
        let e = ApiError::from_service(ServiceError::Model(ModelError::Validation("Service name is required".into())), "x");
        assert_eq!((e.status, e.message.as_str()), (StatusCode::BAD_REQUEST, "Service name is required"));

        let e = ApiError::from_service(ServiceError::not_found("Service"), "x");
        assert_eq!((e.status, e.message.as_str()), (StatusCode::NOT_FOUND, "Service not found"));

        let e = ApiError::from_service(
            ServiceError::PartialCreate { service_id: 3, source: Box::new(ServiceError::Db("disk".into())) },
            "Failed to create service",
        );
        assert_eq!((e.status, e.message.as_str()), (StatusCode::INTERNAL_SERVER_ERROR, PARTIAL_CREATE_MESSAGE));
    }

    #[test]
    fn storage_errors_do_not_leak() {
        let e = ApiError::from_service(ServiceError::Db("no such table: services".into()), "Failed to fetch services");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Failed to fetch services");
    }
}
