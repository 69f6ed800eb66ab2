#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}, Router};
use configs::ServerConfig;
use migration::{Migrator, MigratorTrait};
use serde_json::Value;
use service::catalog::{repo::seaorm::SeaOrmStorage, repository::ApiKeyRepository, Storage};
use tower::ServiceExt;

use server::{routes::build_router, AppState};

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Router over a migrated in-memory database holding `TEST_KEY`.
pub async fn sqlite_app() -> Router {
    let db = models::db::connect_in_memory().await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    let storage = SeaOrmStorage::new(db);
    storage.insert_api_key(TEST_KEY).await.expect("seed key");
    app_with(Arc::new(storage))
}

pub fn app_with(storage: Arc<dyn Storage>) -> Router {
    build_router(AppState::new(storage, &ServerConfig::default()))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_key(app, method, uri, body, Some(TEST_KEY)).await
}

pub async fn send_with_key(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    key: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(k) = key {
        req = req.header("X-API-Key", k);
    }
    let req = match body {
        Some(v) => req.header("content-type", "application/json").body(Body::from(v.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    read(app.clone().oneshot(req).await.unwrap()).await
}

pub async fn read(resp: axum::response::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}
