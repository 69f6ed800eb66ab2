mod common;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::StatusCode;
use configs::ServerConfig;
use serde_json::json;
use service::{
    catalog::{
        domain::{NewVersion, ServiceDetail, ServiceQuery, ServiceSummary, Version},
        repository::{mock::MockStorage, ApiKeyRepository, ServiceRepository, VersionRepository},
    },
    errors::ServiceError,
};

use common::{app_with, send, send_with_key, sqlite_app, TEST_KEY};
use server::{routes::build_router, AppState};

#[tokio::test]
async fn missing_key_is_401() {
    let app = sqlite_app().await;
    let (status, body) = send_with_key(&app, "GET", "/services", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"code": 401, "data": null, "error": "API key is missing", "success": false}));

    let (status, _) = send_with_key(&app, "GET", "/services", None, Some("   ")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_key_is_403_on_every_route() {
    let app = sqlite_app().await;
    for (method, uri) in [("GET", "/services"), ("GET", "/services/1"), ("DELETE", "/versions/1"), ("GET", "/nope")] {
        let (status, body) = send_with_key(&app, method, uri, None, Some("not-a-key")).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["error"], "Invalid API key");
    }
}

#[tokio::test]
async fn valid_key_passes_and_is_trimmed() {
    let app = sqlite_app().await;
    let padded = format!("  {TEST_KEY} ");
    let (status, body) = send_with_key(&app, "GET", "/services", None, Some(&padded)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn key_lookup_failure_fails_closed() {
    let storage = Arc::new(MockStorage::with_key("k"));
    storage.set_fail_key_lookup(true);
    let app = app_with(storage);
    let (status, body) = send_with_key(&app, "GET", "/services", None, Some("k")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid API key");
}

#[tokio::test]
async fn failed_first_version_reports_partial_create() {
    let storage = Arc::new(MockStorage::with_key("k"));
    storage.set_fail_version_writes(true);
    let app = app_with(storage.clone());

    let (status, body) = send_with_key(
        &app,
        "POST",
        "/services",
        Some(json!({"name": "Auth", "description": "", "version": "1.0.0"})),
        Some("k"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Service created but failed to add version");

    // the service row is kept without a version
    storage.set_fail_version_writes(false);
    let (_, list) = send_with_key(&app, "GET", "/services", None, Some("k")).await;
    assert_eq!(list["data"][0]["name"], "Auth");
    assert_eq!(list["data"][0]["versions"], json!([]));
    assert_eq!(storage.version_count(), 0);
}

#[tokio::test]
async fn storage_failure_is_generic_500() {
    let storage = Arc::new(MockStorage::with_key("k"));
    storage.set_fail_reads(true);
    let app = app_with(storage);
    let (status, body) = send_with_key(&app, "GET", "/services", None, Some("k")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch services");
}

/// Accepts any key and never finishes a list.
struct StalledStorage;

#[async_trait]
impl ServiceRepository for StalledStorage {
    async fn list_services(&self, _query: &ServiceQuery) -> Result<Vec<ServiceSummary>, ServiceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![])
    }
    async fn get_service(&self, _id: i32) -> Result<Option<ServiceDetail>, ServiceError> { Ok(None) }
    async fn create_service(&self, _name: &str, _description: &str) -> Result<i32, ServiceError> { Ok(1) }
    async fn update_service(&self, _id: i32, _name: &str, _description: &str) -> Result<(), ServiceError> { Ok(()) }
    async fn delete_service(&self, _id: i32) -> Result<(), ServiceError> { Ok(()) }
}

#[async_trait]
impl VersionRepository for StalledStorage {
    async fn create_version(&self, _input: NewVersion) -> Result<i32, ServiceError> { Ok(1) }
    async fn list_versions(&self, _service_id: i32) -> Result<Vec<Version>, ServiceError> { Ok(vec![]) }
    async fn get_version(&self, _id: i32) -> Result<Option<Version>, ServiceError> { Ok(None) }
    async fn delete_version(&self, _id: i32) -> Result<bool, ServiceError> { Ok(false) }
}

#[async_trait]
impl ApiKeyRepository for StalledStorage {
    async fn is_valid_api_key(&self, _key: &str) -> bool { true }
    async fn count_api_keys(&self) -> Result<u64, ServiceError> { Ok(1) }
    async fn insert_api_key(&self, _key: &str) -> Result<(), ServiceError> { Ok(()) }
}

#[tokio::test]
async fn slow_request_hits_deadline() {
    let state = AppState::new(Arc::new(StalledStorage), &ServerConfig::default())
        .with_request_timeout(Duration::from_millis(50));
    let app = build_router(state);

    let started = std::time::Instant::now();
    let (status, body) = send(&app, "GET", "/services", None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Request timed out");
    assert!(started.elapsed() < Duration::from_secs(5));

    let (status, _) = send(&app, "GET", "/services/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
