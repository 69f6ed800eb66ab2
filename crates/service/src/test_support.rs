#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::catalog::repo::seaorm::SeaOrmStorage;

/// A private, migrated in-memory database per call.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn memory_storage() -> Result<SeaOrmStorage, anyhow::Error> {
    Ok(SeaOrmStorage::new(memory_db().await?))
}
