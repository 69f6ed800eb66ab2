//! First-boot API key provisioning.

use rand::{rngs::OsRng, RngCore};
use tracing::info;

use crate::catalog::repository::ApiKeyRepository;
use crate::errors::ServiceError;

const API_KEY_BYTES: usize = 16;

/// 16 bytes from the OS RNG, hex-encoded (32 chars).
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Persist a fresh key when the key table is empty.
///
/// Returns the generated key so the caller can surface it; `None` when keys
/// already exist.
pub async fn ensure_api_key<S>(store: &S) -> Result<Option<String>, ServiceError>
where
    S: ApiKeyRepository + ?Sized,
{
    let existing = store.count_api_keys().await?;
    if existing > 0 {
        info!(existing, "api keys present; skipping bootstrap");
        return Ok(None);
    }
    let key = generate_api_key();
    store.insert_api_key(&key).await?;
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::MockStorage;
    use crate::test_support::memory_storage;

    #[test]
    fn generated_key_is_32_hex_chars() {
        let k = generate_api_key();
        assert_eq!(k.len(), 32);
        assert!(k.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(k, generate_api_key());
    }

    #[tokio::test]
    async fn generates_once() -> anyhow::Result<()> {
        let store = memory_storage().await?;
        let key = ensure_api_key(&store).await?.expect("first boot generates");
        assert!(store.is_valid_api_key(&key).await);
        assert!(ensure_api_key(&store).await?.is_none());
        assert_eq!(store.count_api_keys().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn existing_key_is_kept() -> anyhow::Result<()> {
        let store = MockStorage::with_key("preprovisioned");
        assert!(ensure_api_key(&store).await?.is_none());
        assert!(store.is_valid_api_key("preprovisioned").await);
        Ok(())
    }
}
