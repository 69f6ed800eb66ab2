use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// A release record as returned to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: i32,
    pub service_id: i32,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<models::version::Model> for Version {
    fn from(m: models::version::Model) -> Self {
        Self {
            id: m.id,
            service_id: m.service_id,
            version: m.version,
            changelog: m.changelog,
            created_at: m.created_at,
        }
    }
}

/// Input for a new version; the caller chooses `created_at`.
#[derive(Clone, Debug)]
pub struct NewVersion {
    pub service_id: i32,
    pub version: String,
    pub changelog: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// List row: version labels only, in creation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub versions: Vec<String>,
}

/// Single-service view carrying full version records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub versions: Vec<Version>,
}

impl ServiceSummary {
    pub fn from_parts(svc: models::service::Model, mut versions: Vec<models::version::Model>) -> Self {
        versions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Self {
            id: svc.id,
            name: svc.name,
            description: svc.description,
            created_at: svc.created_at,
            versions: versions.into_iter().map(|v| v.version).collect(),
        }
    }
}

impl ServiceDetail {
    pub fn from_parts(svc: models::service::Model, mut versions: Vec<models::version::Model>) -> Self {
        versions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Self {
            id: svc.id,
            name: svc.name,
            description: svc.description,
            created_at: svc.created_at,
            versions: versions.into_iter().map(Version::from).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    CreatedAt,
}

impl SortKey {
    /// `createdAt` (any case) sorts by creation time, any other non-empty
    /// value by name, and an empty value leaves the store's default order.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if raw.eq_ignore_ascii_case("createdat") {
            Some(Self::CreatedAt)
        } else {
            Some(Self::Name)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceQuery {
    pub filter: Option<String>,
    pub sort: Option<SortKey>,
    pub pagination: Pagination,
}

impl ServiceQuery {
    pub fn from_raw(filter: Option<&str>, sort: Option<&str>, page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            filter: filter.map(str::trim).filter(|f| !f.is_empty()).map(str::to_string),
            sort: sort.and_then(SortKey::parse),
            pagination: Pagination::from_raw(page, limit),
        }
    }
}

/// Body of a create-service request: the service plus its first version.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateServiceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub changelog: Option<String>,
}
