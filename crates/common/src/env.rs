//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Create the parent directory of the database file if it is missing.
pub async fn ensure_db_dir(db_path: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = db_path else { return Ok(()) };
    let Some(parent) = Path::new(path).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        info!(dir = %parent.display(), "created database directory");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_path_is_noop() {
        ensure_db_dir(None).await.unwrap();
        ensure_db_dir(Some("services.db")).await.unwrap();
    }

    #[tokio::test]
    async fn creates_missing_parent() {
        let dir = std::env::temp_dir().join(format!("catalog-env-{}", std::process::id()));
        let file = dir.join("nested").join("services.db");
        ensure_db_dir(file.to_str()).await.unwrap();
        assert!(file.parent().unwrap().is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
