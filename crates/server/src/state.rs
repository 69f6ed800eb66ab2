use std::sync::Arc;
use std::time::Duration;

use configs::ServerConfig;
use service::catalog::{CatalogService, Storage};

/// Request-scoped context shared by every handler and middleware.
///
/// Built once at startup; nothing in the HTTP layer reaches for globals.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, server: &ServerConfig) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(storage)),
            request_timeout: Duration::from_secs(server.request_timeout_secs.max(1)),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
