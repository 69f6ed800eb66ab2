use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, Set};

use crate::{api_key, db, service, version};

async fn migrated() -> anyhow::Result<sea_orm::DatabaseConnection> {
    let db = db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[test]
fn name_validation() {
    assert!(service::validate_service_name("auth").is_ok());
    assert!(service::validate_service_name("").is_err());
    assert!(service::validate_service_name("   ").is_err());
}

#[test]
fn blank_changelog_is_dropped() {
    assert_eq!(version::normalize_changelog(Some("  ".into())), None);
    assert_eq!(version::normalize_changelog(Some("fix".into())), Some("fix".into()));
    assert_eq!(version::normalize_changelog(None), None);
}

#[test]
fn version_json_uses_camel_case_and_omits_empty_changelog() {
    let v = version::Model {
        id: 3,
        service_id: 1,
        version: "1.0.0".into(),
        changelog: None,
        created_at: Utc::now(),
    };
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["serviceId"], 1);
    assert!(json.get("createdAt").is_some());
    assert!(json.get("changelog").is_none());
}

#[tokio::test]
async fn migrations_create_all_tables() -> anyhow::Result<()> {
    let db = migrated().await?;
    for table in ["services", "versions", "api_keys"] {
        let stmt = sea_orm::Statement::from_string(
            db.get_database_backend(),
            format!("SELECT count(*) FROM {table}"),
        );
        db.execute(stmt).await?;
    }
    // re-running is a no-op
    migration::Migrator::up(&db, None).await?;
    Ok(())
}

#[tokio::test]
async fn service_has_many_versions() -> anyhow::Result<()> {
    let db = migrated().await?;
    let svc = service::ActiveModel {
        name: Set("billing".into()),
        description: Set("invoices".into()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    for label in ["1.0.0", "1.1.0"] {
        version::ActiveModel {
            service_id: Set(svc.id),
            version: Set(label.into()),
            changelog: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }
    let versions = svc.find_related(version::Entity).all(&db).await?;
    assert_eq!(versions.len(), 2);
    Ok(())
}

#[tokio::test]
async fn deleting_service_cascades_to_versions() -> anyhow::Result<()> {
    let db = migrated().await?;
    let svc = service::ActiveModel {
        name: Set("search".into()),
        description: Set(String::new()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    version::ActiveModel {
        service_id: Set(svc.id),
        version: Set("0.1.0".into()),
        changelog: Set(Some("first".into())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    service::Entity::delete_by_id(svc.id).exec(&db).await?;
    assert!(version::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn api_key_is_unique() -> anyhow::Result<()> {
    let db = migrated().await?;
    let key = || api_key::ActiveModel {
        key: Set("deadbeef".into()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    key().insert(&db).await?;
    assert!(key().insert(&db).await.is_err());
    Ok(())
}
