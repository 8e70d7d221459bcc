//! Credential file storage.
//!
//! Stores credentials as a flat JSON object in `secret.json`:
//!
//! ```json
//! { "deep_travel_api_key": "sk-...", "deep_travel_model": "gpt-4.1" }
//! ```

use async_trait::async_trait;
use deeptravel_core::error::{DeepTravelError, Result};
use deeptravel_core::storage::SecretStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::atomic_write::write_atomic;

const SECRET_FILE_MODE: u32 = 0o600;

/// File-backed [`SecretStore`].
///
/// Responsibilities:
/// - Read/write `secret.json` atomically
/// - Keep the file at permissions 600 on Unix
///
/// Does NOT:
/// - Encrypt values (protection relies on file permissions)
/// - Validate API keys
///
/// Values never appear in log output or error messages.
pub struct FileSecretStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileSecretStore {
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            DeepTravelError::storage(format!(
                "Secret file {} is not a JSON object of strings: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write_all(&self, secrets: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(secrets)?;
        write_atomic(&self.path, json.as_bytes(), Some(SECRET_FILE_MODE)).await?;
        Ok(())
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut secrets = self.read_all().await?;
        secrets.insert(key.to_string(), value.to_string());
        self.write_all(&secrets).await
    }

    async fn delete_secret(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut secrets = self.read_all().await?;
        if secrets.remove(key).is_some() {
            self.write_all(&secrets).await?;
        }
        Ok(())
    }
}
