use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, version};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Versions }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Versions => Entity::has_many(version::Entity).into(),
        }
    }
}

impl Related<version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Versions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A service name must carry at least one non-whitespace character.
pub fn validate_service_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("Service name is required".into()));
    }
    Ok(())
}
