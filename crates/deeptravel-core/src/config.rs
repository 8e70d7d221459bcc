//! Application configuration (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{DeepTravelError, Result};

/// Dotted keys accepted by [`AppConfig::set_value`].
pub const CONFIG_KEYS: &[&str] = &[
    "storage.data_dir",
    "logging.level",
    "logging.file",
    "attachments.max_dimension",
    "attachments.jpeg_quality",
    "attachments.max_selection",
];

/// Root of `config.toml`. Every section and field has a default, so a
/// partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub attachments: AttachmentConfig,
}

impl AppConfig {
    /// Sets one dotted key (see [`CONFIG_KEYS`]) from its text form.
    ///
    /// An empty `storage.data_dir` removes the override.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "storage.data_dir" => {
                self.storage.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "logging.level" => {
                if value.is_empty() {
                    return Err(invalid_value(key, value));
                }
                self.logging.level = value.to_string();
            }
            "logging.file" => self.logging.file = parse_value(key, value)?,
            "attachments.max_dimension" => {
                self.attachments.max_dimension = parse_in_range(key, value, 1..=u32::MAX)?;
            }
            "attachments.jpeg_quality" => {
                self.attachments.jpeg_quality = parse_in_range(key, value, 1..=100)?;
            }
            "attachments.max_selection" => {
                self.attachments.max_selection = parse_in_range(key, value, 1..=usize::MAX)?;
            }
            _ => {
                return Err(DeepTravelError::invalid_input(format!(
                    "Unknown config key '{}' (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn invalid_value(key: &str, value: &str) -> DeepTravelError {
    DeepTravelError::invalid_input(format!("Invalid value '{}' for {}", value, key))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid_value(key, value))
}

fn parse_in_range<T>(key: &str, value: &str, range: std::ops::RangeInclusive<T>) -> Result<T>
where
    T: FromStr + PartialOrd,
{
    let parsed: T = parse_value(key, value)?;
    if !range.contains(&parsed) {
        return Err(invalid_value(key, value));
    }
    Ok(parsed)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Also write a daily-rolling log file under the data directory.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Longest side, in pixels, of a processed image.
    pub max_dimension: u32,
    /// JPEG quality (1-100) of a processed image.
    pub jpeg_quality: u8,
    /// Maximum number of images picked from the library at once.
    pub max_selection: usize,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1024,
            jpeg_quality: 60,
            max_selection: 10,
        }
    }
}

impl AttachmentConfig {
    /// Quality clamped into the encoder's accepted range.
    pub fn effective_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
