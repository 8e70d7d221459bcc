//! Settings repository trait.

use async_trait::async_trait;

use super::model::Settings;
use crate::error::Result;

/// Credential store key of the API key.
pub const API_KEY_SECRET_KEY: &str = "deep_travel_api_key";
/// Credential store key of the selected model.
pub const MODEL_SECRET_KEY: &str = "deep_travel_model";

/// Persistence for [`Settings`]. Each field is stored independently.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the stored settings; absent fields take their defaults.
    async fn load_settings(&self) -> Result<Settings>;

    /// Stores the API key, or deletes it when `api_key` is empty.
    async fn save_api_key(&self, api_key: &str) -> Result<()>;

    /// Stores the model id, or deletes it when `model` is empty.
    async fn save_model(&self, model: &str) -> Result<()>;
}
