use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use models::{service::validate_service_name, version::normalize_changelog};

use super::domain::{CreateServiceInput, NewVersion, ServiceDetail, ServiceQuery, ServiceSummary, Version};
use super::repository::Storage;
use crate::errors::ServiceError;

/// Application service encapsulating catalog business rules.
/// Validation happens here so storage implementations can stay dumb.
#[derive(Clone)]
pub struct CatalogService {
    storage: Arc<dyn Storage>,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self { Self { storage } }

    pub async fn list(&self, query: &ServiceQuery) -> Result<Vec<ServiceSummary>, ServiceError> {
        self.storage.list_services(query).await
    }

    pub async fn get(&self, id: i32) -> Result<ServiceDetail, ServiceError> {
        self.storage
            .get_service(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service"))
    }

    /// Create a service and its first version as two separate writes.
    ///
    /// A failure of the second write is reported as `PartialCreate`; the
    /// service row is kept.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateServiceInput) -> Result<i32, ServiceError> {
        validate_service_name(&input.name)?;

        let id = self.storage.create_service(&input.name, &input.description).await?;
        let first = NewVersion {
            service_id: id,
            version: input.version,
            changelog: normalize_changelog(input.changelog),
            created_at: Utc::now(),
        };
        if let Err(e) = self.storage.create_version(first).await {
            warn!(service_id = id, error = %e, "service stored without its initial version");
            return Err(ServiceError::PartialCreate { service_id: id, source: Box::new(e) });
        }
        info!(service_id = id, "service created");
        Ok(id)
    }

    pub async fn update(&self, id: i32, name: &str, description: &str) -> Result<(), ServiceError> {
        validate_service_name(name)?;
        self.storage.update_service(id, name, description).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.storage.delete_service(id).await
    }

    /// Add a version stamped with the current time and return the stored record.
    /// Labels are free-form; an empty one is stored as given.
    pub async fn add_version(&self, service_id: i32, version: &str, changelog: Option<String>) -> Result<Version, ServiceError> {
        let input = NewVersion {
            service_id,
            version: version.to_string(),
            changelog: normalize_changelog(changelog),
            created_at: Utc::now(),
        };
        let record = Version {
            id: 0,
            service_id,
            version: input.version.clone(),
            changelog: input.changelog.clone(),
            created_at: input.created_at,
        };
        let id = self.storage.create_version(input).await?;
        Ok(Version { id, ..record })
    }

    pub async fn versions(&self, service_id: i32) -> Result<Vec<Version>, ServiceError> {
        self.storage.list_versions(service_id).await
    }

    pub async fn version(&self, id: i32) -> Result<Version, ServiceError> {
        self.storage
            .get_version(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Version"))
    }

    pub async fn delete_version(&self, id: i32) -> Result<(), ServiceError> {
        if self.storage.delete_version(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Version"))
        }
    }

    /// Header value check: trimmed, non-empty, present in the key store.
    pub async fn authorize(&self, raw_key: &str) -> bool {
        let key = raw_key.trim();
        !key.is_empty() && self.storage.is_valid_api_key(key).await
    }
}
