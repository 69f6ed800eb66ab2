use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use utoipa::IntoParams;

use service::catalog::domain::{CreateServiceInput, ServiceQuery};

use crate::{envelope, errors::ApiError, routes::parse_id, state::AppState};

const INVALID_SERVICE_ID: &str = "Invalid service ID";

/// Raw list parameters. Kept as strings so bad numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring of name or description
    pub filter: Option<String>,
    /// `createdAt` or any other value for name order
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[utoipa::path(
    get, path = "/services", tag = "services",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "Failed to fetch services")
    )
)]
pub async fn list(State(state): State<AppState>, query: Result<Query<ListQuery>, QueryRejection>) -> Result<Response, ApiError> {
    let q = query.map(|Query(q)| q).unwrap_or_default();
    let query = ServiceQuery::from_raw(q.filter.as_deref(), q.sort.as_deref(), q.page.as_deref(), q.limit.as_deref());
    let items = state
        .catalog
        .list(&query)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch services"))?;
    debug!(count = items.len(), page = query.pagination.page, "list services");
    Ok(envelope::ok(items))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Invalid service ID"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id, INVALID_SERVICE_ID)?;
    let detail = state
        .catalog
        .get(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch service"))?;
    Ok(envelope::ok(detail))
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::CreateServiceInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<AppState>, body: Result<Json<CreateServiceInput>, JsonRejection>) -> Result<Response, ApiError> {
    let Json(input) = body.map_err(|_| ApiError::bad_request("Invalid input"))?;
    let id = state
        .catalog
        .create(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to create service"))?;
    info!(service_id = id, "created service");
    Ok(envelope::ok(json!({ "id": id })))
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = crate::openapi::UpdateServiceInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Service not found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateServiceInput>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id, INVALID_SERVICE_ID)?;
    let Json(input) = body.map_err(|_| ApiError::bad_request("Invalid input"))?;
    state
        .catalog
        .update(id, &input.name, &input.description)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to update service"))?;
    info!(service_id = id, "updated service");
    Ok(envelope::ok("service updated"))
}

#[utoipa::path(
    delete, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid service ID"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id, INVALID_SERVICE_ID)?;
    state
        .catalog
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete service"))?;
    info!(service_id = id, "deleted service");
    Ok(envelope::ok("service deleted successfully"))
}
