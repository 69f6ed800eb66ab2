use axum::Json;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct CreateServiceInputDoc {
    pub name: String,
    pub description: String,
    pub version: String,
    pub changelog: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateServiceInputDoc { pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct CreateVersionInputDoc { pub version: String, pub changelog: Option<String> }

#[derive(ToSchema)]
pub struct EnvelopeDoc {
    pub code: u16,
    #[schema(value_type = Object)]
    pub data: Option<String>,
    pub error: String,
    pub success: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::versions::create,
        crate::routes::versions::list,
        crate::routes::versions::get,
        crate::routes::versions::delete,
    ),
    components(
        schemas(
            CreateServiceInputDoc,
            UpdateServiceInputDoc,
            CreateVersionInputDoc,
            EnvelopeDoc,
        )
    ),
    tags(
        (name = "services"),
        (name = "versions")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
