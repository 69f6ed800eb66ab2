use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{envelope, errors::ApiError, routes::parse_id, state::AppState};

const INVALID_SERVICE_ID: &str = "Invalid service ID";
const INVALID_VERSION_ID: &str = "Invalid version ID";

#[derive(Debug, Default, Deserialize)]
pub struct CreateVersionInput {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub changelog: Option<String>,
}

#[utoipa::path(
    post, path = "/services/{id}/versions", tag = "versions",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = crate::openapi::CreateVersionInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Service not found"),
        (status = 500, description = "Failed to add version")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CreateVersionInput>, JsonRejection>,
) -> Result<Response, ApiError> {
    let service_id = parse_id(&id, INVALID_SERVICE_ID)?;
    let Json(input) = body.map_err(|_| ApiError::bad_request("Invalid input"))?;
    let version = state
        .catalog
        .add_version(service_id, &input.version, input.changelog)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to add version"))?;
    info!(service_id, version_id = version.id, label = %version.version, "added version");
    Ok(envelope::ok(version))
}

#[utoipa::path(
    get, path = "/services/{id}/versions", tag = "versions",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Invalid service ID"),
        (status = 500, description = "Failed to fetch versions")
    )
)]
pub async fn list(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let service_id = parse_id(&id, INVALID_SERVICE_ID)?;
    let versions = state
        .catalog
        .versions(service_id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch versions"))?;
    Ok(envelope::ok(versions))
}

#[utoipa::path(
    get, path = "/versions/{id}", tag = "versions",
    params(("id" = i32, Path, description = "Version ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Invalid version ID"),
        (status = 404, description = "Version not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id, INVALID_VERSION_ID)?;
    let version = state
        .catalog
        .version(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch version"))?;
    Ok(envelope::ok(version))
}

#[utoipa::path(
    delete, path = "/versions/{id}", tag = "versions",
    params(("id" = i32, Path, description = "Version ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid version ID"),
        (status = 404, description = "Version not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id, INVALID_VERSION_ID)?;
    state
        .catalog
        .delete_version(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete version"))?;
    info!(version_id = id, "deleted version");
    Ok(envelope::empty(StatusCode::NO_CONTENT))
}
