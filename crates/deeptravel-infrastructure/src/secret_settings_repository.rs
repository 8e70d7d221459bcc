//! SettingsRepository backed by the credential store.

use async_trait::async_trait;
use deeptravel_core::error::Result;
use deeptravel_core::settings::{API_KEY_SECRET_KEY, MODEL_SECRET_KEY, Settings, SettingsRepository};
use deeptravel_core::storage::SecretStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct SecretSettingsRepository {
    store: Arc<dyn SecretStore>,
}

impl SecretSettingsRepository {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    async fn put_or_delete(&self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            self.store.delete_secret(key).await
        } else {
            self.store.set_secret(key, value).await
        }
    }
}

#[async_trait]
impl SettingsRepository for SecretSettingsRepository {
    async fn load_settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(api_key) = self.store.get_secret(API_KEY_SECRET_KEY).await?
            && !api_key.is_empty()
        {
            settings.api_key = api_key;
        }
        // Stored model ids are accepted as-is, known to the catalogue or not.
        if let Some(model) = self.store.get_secret(MODEL_SECRET_KEY).await?
            && !model.is_empty()
        {
            settings.model = model;
        }

        Ok(settings)
    }

    async fn save_api_key(&self, api_key: &str) -> Result<()> {
        self.put_or_delete(API_KEY_SECRET_KEY, api_key).await
    }

    async fn save_model(&self, model: &str) -> Result<()> {
        self.put_or_delete(MODEL_SECRET_KEY, model).await
    }
}
