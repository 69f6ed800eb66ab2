use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::service;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "versions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_id: i32,
    pub version: String,
    #[sea_orm(column_type = "Text", nullable)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Empty or whitespace-only changelogs are stored as NULL.
pub fn normalize_changelog(changelog: Option<String>) -> Option<String> {
    changelog.filter(|c| !c.trim().is_empty())
}
