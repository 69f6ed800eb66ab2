use async_trait::async_trait;

use super::domain::{NewVersion, ServiceDetail, ServiceQuery, ServiceSummary, Version};
use crate::errors::ServiceError;

/// Persistence operations on catalog services.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Filtered, sorted page of services. No matches is an empty vec, not an error.
    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<ServiceSummary>, ServiceError>;
    /// A service with zero versions is still returned, with an empty list.
    async fn get_service(&self, id: i32) -> Result<Option<ServiceDetail>, ServiceError>;
    /// Returns the generated id; `created_at` is assigned by the store.
    async fn create_service(&self, name: &str, description: &str) -> Result<i32, ServiceError>;
    /// `NotFound` when no row has `id`.
    async fn update_service(&self, id: i32, name: &str, description: &str) -> Result<(), ServiceError>;
    /// Idempotent: deleting an absent id succeeds.
    async fn delete_service(&self, id: i32) -> Result<(), ServiceError>;
}

/// Persistence operations on versions.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// `NotFound` when the owning service does not exist.
    async fn create_version(&self, input: NewVersion) -> Result<i32, ServiceError>;
    /// Newest first.
    async fn list_versions(&self, service_id: i32) -> Result<Vec<Version>, ServiceError>;
    async fn get_version(&self, id: i32) -> Result<Option<Version>, ServiceError>;
    /// True iff a row was removed.
    async fn delete_version(&self, id: i32) -> Result<bool, ServiceError>;
}

/// API key lookups plus the bootstrap writes.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Exact match. Any lookup failure counts as invalid.
    async fn is_valid_api_key(&self, key: &str) -> bool;
    async fn count_api_keys(&self) -> Result<u64, ServiceError>;
    async fn insert_api_key(&self, key: &str) -> Result<(), ServiceError>;
}

/// The full capability set handed to the HTTP layer.
pub trait Storage: ServiceRepository + VersionRepository + ApiKeyRepository {}

impl<T> Storage for T where T: ServiceRepository + VersionRepository + ApiKeyRepository {}

/// Simple in-memory mock storage for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::catalog::domain::SortKey;

    #[derive(Default)]
    struct State {
        services: Vec<models::service::Model>,
        versions: Vec<models::version::Model>,
        keys: Vec<String>,
        next_id: i32,
    }

    impl State {
        fn next_id(&mut self) -> i32 {
            self.next_id += 1;
            self.next_id
        }
    }

    /// Behaves like the SQL store; the `fail_*` switches inject storage errors.
    #[derive(Default)]
    pub struct MockStorage {
        state: Mutex<State>,
        pub fail_reads: AtomicBool,
        pub fail_version_writes: AtomicBool,
        pub fail_key_lookup: AtomicBool,
    }

    impl MockStorage {
        pub fn with_key(key: &str) -> Self {
            let mock = Self::default();
            mock.state.lock().unwrap().keys.push(key.to_string());
            mock
        }

        pub fn set_fail_version_writes(&self, on: bool) { self.fail_version_writes.store(on, Ordering::SeqCst) }
        pub fn set_fail_reads(&self, on: bool) { self.fail_reads.store(on, Ordering::SeqCst) }
        pub fn set_fail_key_lookup(&self, on: bool) { self.fail_key_lookup.store(on, Ordering::SeqCst) }

        pub fn version_count(&self) -> usize { self.state.lock().unwrap().versions.len() }

        fn check_reads(&self) -> Result<(), ServiceError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("injected read failure".into()));
            }
            Ok(())
        }
    }

    fn versions_of(state: &State, service_id: i32) -> Vec<models::version::Model> {
        state.versions.iter().filter(|v| v.service_id == service_id).cloned().collect()
    }

    #[async_trait]
    impl ServiceRepository for MockStorage {
        async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<ServiceSummary>, ServiceError> {
            self.check_reads()?;
            let state = self.state.lock().unwrap();
            let needle = query.filter.as_deref().map(str::to_lowercase);
            let mut rows: Vec<_> = state
                .services
                .iter()
                .filter(|s| match &needle {
                    Some(n) => s.name.to_lowercase().contains(n) || s.description.to_lowercase().contains(n),
                    None => true,
                })
                .cloned()
                .collect();
            match query.sort {
                Some(SortKey::Name) => rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
                Some(SortKey::CreatedAt) => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))),
                None => rows.sort_by_key(|s| s.id),
            }
            let p = query.pagination;
            Ok(rows
                .into_iter()
                .skip(p.offset() as usize)
                .take(p.limit as usize)
                .map(|s| {
                    let vs = versions_of(&state, s.id);
                    ServiceSummary::from_parts(s, vs)
                })
                .collect())
        }

        async fn get_service(&self, id: i32) -> Result<Option<ServiceDetail>, ServiceError> {
            self.check_reads()?;
            let state = self.state.lock().unwrap();
            Ok(state
                .services
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .map(|s| ServiceDetail::from_parts(s, versions_of(&state, id))))
        }

        async fn create_service(&self, name: &str, description: &str) -> Result<i32, ServiceError> {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            state.services.push(models::service::Model {
                id,
                name: name.to_string(),
                description: description.to_string(),
                created_at: Utc::now(),
            });
            Ok(id)
        }

        async fn update_service(&self, id: i32, name: &str, description: &str) -> Result<(), ServiceError> {
            let mut state = self.state.lock().unwrap();
            let svc = state
                .services
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| ServiceError::not_found("Service"))?;
            svc.name = name.to_string();
            svc.description = description.to_string();
            Ok(())
        }

        async fn delete_service(&self, id: i32) -> Result<(), ServiceError> {
            let mut state = self.state.lock().unwrap();
            state.services.retain(|s| s.id != id);
            state.versions.retain(|v| v.service_id != id);
            Ok(())
        }
    }

    #[async_trait]
    impl VersionRepository for MockStorage {
        async fn create_version(&self, input: NewVersion) -> Result<i32, ServiceError> {
            if self.fail_version_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("injected version write failure".into()));
            }
            let mut state = self.state.lock().unwrap();
            if !state.services.iter().any(|s| s.id == input.service_id) {
                return Err(ServiceError::not_found("Service"));
            }
            let id = state.next_id();
            state.versions.push(models::version::Model {
                id,
                service_id: input.service_id,
                version: input.version,
                changelog: input.changelog,
                created_at: input.created_at,
            });
            Ok(id)
        }

        async fn list_versions(&self, service_id: i32) -> Result<Vec<Version>, ServiceError> {
            self.check_reads()?;
            let state = self.state.lock().unwrap();
            let mut vs = versions_of(&state, service_id);
            vs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(vs.into_iter().map(Version::from).collect())
        }

        async fn get_version(&self, id: i32) -> Result<Option<Version>, ServiceError> {
            self.check_reads()?;
            let state = self.state.lock().unwrap();
            Ok(state.versions.iter().find(|v| v.id == id).cloned().map(Version::from))
        }

        async fn delete_version(&self, id: i32) -> Result<bool, ServiceError> {
            let mut state = self.state.lock().unwrap();
            let before = state.versions.len();
            state.versions.retain(|v| v.id != id);
            Ok(state.versions.len() != before)
        }
    }

    #[async_trait]
    impl ApiKeyRepository for MockStorage {
        async fn is_valid_api_key(&self, key: &str) -> bool {
            if self.fail_key_lookup.load(Ordering::SeqCst) {
                return false;
            }
            self.state.lock().unwrap().keys.iter().any(|k| k == key)
        }

        async fn count_api_keys(&self) -> Result<u64, ServiceError> {
            Ok(self.state.lock().unwrap().keys.len() as u64)
        }

        async fn insert_api_key(&self, key: &str) -> Result<(), ServiceError> {
            self.state.lock().unwrap().keys.push(key.to_string());
            Ok(())
        }
    }
}
