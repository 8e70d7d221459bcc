//! Configuration service implementation.
//!
//! Loads `config.toml` from the config directory, creating it with defaults
//! when missing.

use crate::paths::DeepTravelPaths;
use crate::storage::AtomicTomlFile;
use deeptravel_core::config::AppConfig;
use deeptravel_core::error::{DeepTravelError, Result};
use std::path::{Path, PathBuf};

/// Loads and writes the application configuration.
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigService {
    pub fn new(paths: &DeepTravelPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| DeepTravelError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Loads the configuration.
    ///
    /// A missing file is created with defaults. An unreadable or malformed
    /// file is left untouched and defaults are used for this run.
    pub fn load_or_create(&self) -> AppConfig {
        match self.file.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = AppConfig::default();
                if let Err(e) = self.file.save(&config) {
                    tracing::warn!(
                        "[ConfigService] Failed to write default config to {}: {}",
                        self.file.path().display(),
                        e
                    );
                }
                config
            }
            Err(e) => {
                tracing::warn!(
                    "[ConfigService] Ignoring unreadable config {}: {}",
                    self.file.path().display(),
                    e
                );
                AppConfig::default()
            }
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Applies `f` to the stored configuration under the file lock.
    ///
    /// Nothing is written when `f` fails.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig) -> Result<()>,
    {
        self.file.update(AppConfig::default(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let config = service.load_or_create();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging\nlevel = ").unwrap();
        let service = ConfigService::with_path(path.clone());

        assert_eq!(service.load_or_create(), AppConfig::default());
        // The broken file is left for the user to fix
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[logging\nlevel = ");
    }

    #[test]
    fn test_update_persists() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        service
            .update(|config| config.set_value("logging.level", "debug"))
            .unwrap();

        assert_eq!(service.load_or_create().logging.level, "debug");
    }

    #[test]
    fn test_failed_update_leaves_file_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        service.load_or_create();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = service
            .update(|config| {
                config.logging.level = "trace".to_string();
                config.set_value("attachments.jpeg_quality", "250")
            })
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
