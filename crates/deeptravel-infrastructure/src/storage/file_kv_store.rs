//! File-backed key-value store.

use async_trait::async_trait;
use deeptravel_core::error::{DeepTravelError, Result};
use deeptravel_core::storage::KeyValueStore;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::atomic_write::write_atomic;

/// Key-value store keeping one file per key.
///
/// Directory structure:
/// ```text
/// kv/
/// ├── journeys
/// ├── current_journey_id
/// ├── last_page
/// └── chat_history_1700000000000-k3j9xa_menu
/// ```
///
/// Key names are encoded into portable file names; every write replaces the
/// file atomically.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await.map_err(|e| {
            DeepTravelError::io(format!(
                "Failed to create key-value directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(encode_key(key))
    }
}

/// Encodes a key into a file name: `[A-Za-z0-9_-]` pass through, every other
/// byte becomes `%XX`. Distinct keys always map to distinct names.
pub(crate) fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    if encoded.is_empty() {
        encoded.push('%');
    }
    encoded
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.path_for(key), value.as_bytes(), None).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("chat_history_17-ab_menu"), "chat_history_17-ab_menu");
        assert_eq!(encode_key("a/b"), "a%2Fb");
        assert_eq!(encode_key("..x"), "%2E%2Ex");
        assert_ne!(encode_key("a%2Fb"), encode_key("a/b"));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("kv")).await.unwrap();
        assert_eq!(store.get_item("journeys").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path()).await.unwrap();

        store.set_item("current_journey_id", "J1").await.unwrap();
        assert_eq!(
            store.get_item("current_journey_id").await.unwrap().as_deref(),
            Some("J1")
        );

        store.set_item("current_journey_id", "J2").await.unwrap();
        assert_eq!(
            store.get_item("current_journey_id").await.unwrap().as_deref(),
            Some("J2")
        );

        store.remove_item("current_journey_id").await.unwrap();
        assert_eq!(store.get_item("current_journey_id").await.unwrap(), None);
        // Removing twice is fine
        store.remove_item("current_journey_id").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileKeyValueStore::new(temp_dir.path()).await.unwrap();
            store.set_item("last_page", r#"{"screen":"trip"}"#).await.unwrap();
        }
        let reopened = FileKeyValueStore::new(temp_dir.path()).await.unwrap();
        assert_eq!(
            reopened.get_item("last_page").await.unwrap().as_deref(),
            Some(r#"{"screen":"trip"}"#)
        );
    }
}
