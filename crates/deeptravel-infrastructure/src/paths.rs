//! Unified path management for DeepTravel files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/deeptravel/        # Config directory
//! ├── config.toml              # Application configuration
//! └── secret.json              # API key and model (mode 600)
//!
//! ~/.local/share/deeptravel/   # Data directory
//! ├── kv/                      # Key-value store, one file per key
//! ├── attachments/             # Resized/compressed images
//! └── logs/                    # Application logs
//!     └── deeptravel.log.YYYY-MM-DD
//! ```
//!
//! A base directory (CLI `--config-dir` or `DEEPTRAVEL_HOME`) collapses both roots
//! into that single directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory.
pub const HOME_ENV_VAR: &str = "DEEPTRAVEL_HOME";

const APP_DIR_NAME: &str = "deeptravel";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file and directory DeepTravel uses.
#[derive(Debug, Clone)]
pub struct DeepTravelPaths {
    base: Option<PathBuf>,
    data_override: Option<PathBuf>,
}

impl DeepTravelPaths {
    /// Creates a resolver rooted at `base`, or at the platform directories
    /// when `base` is `None`.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
            data_override: None,
        }
    }

    /// Like [`DeepTravelPaths::new`] but falls back to `DEEPTRAVEL_HOME`.
    pub fn from_env(base: Option<&Path>) -> Self {
        match base {
            Some(base) => Self::new(Some(base)),
            None => {
                let env_base = std::env::var_os(HOME_ENV_VAR).map(PathBuf::from);
                Self::new(env_base.as_deref())
            }
        }
    }

    /// Redirects the data directory (from `[storage] data_dir`).
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        self.data_override = data_dir;
        self
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(data_dir) = &self.data_override {
            return Ok(data_dir.clone());
        }
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path of the credential file.
    ///
    /// # Security Note
    ///
    /// The file is created with permissions 600 on Unix.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn kv_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("kv"))
    }

    pub fn attachments_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("attachments"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
