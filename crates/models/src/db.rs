use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Open the pool described by `cfg`.
///
/// An in-memory url is pinned to a single long-lived connection: each sqlite
/// connection to `:memory:` owns a separate database.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if cfg.is_in_memory() {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    let db = Database::connect(opt).await?;
    info!(url = %cfg.url, max_connections = cfg.max_connections, "database connected");
    Ok(db)
}

/// Shorthand used by tests and tooling: a fresh private in-memory database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    connect_with_config(&cfg).await
}
