use std::sync::Arc;

use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use service::{bootstrap::ensure_api_key, catalog::repo::seaorm::SeaOrmStorage};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::AppState};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Prepare storage and build the shared state. Fails before any traffic is
/// served if the store is unreachable or the schema cannot be applied.
pub async fn prepare(config: AppConfig) -> Result<AppState, StartupError> {
    config.database.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    common::env::ensure_db_dir(config.database.sqlite_path()).await?;

    let db = models::db::connect_with_config(&config.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Schema(e.to_string()))?;

    let storage = SeaOrmStorage::new(db);
    match ensure_api_key(&storage).await {
        // The log line is the only way an operator learns the first key.
        Ok(Some(key)) => warn!(api_key = %key, "generated initial API key; store it now"),
        Ok(None) => info!("api keys already provisioned"),
        Err(e) => return Err(StartupError::Schema(e.to_string())),
    }

    Ok(AppState::new(Arc::new(storage), &config.server))
}

/// Public entry: prepare storage, bind, and serve until Ctrl+C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.bind_addr();
    let state = prepare(config).await?;
    let app = routes::build_router(state);

    let listener = TcpListener::bind(addr.as_str()).await?;
    info!(%addr, "service catalog listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
