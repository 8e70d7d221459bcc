//! Settings state: API key and model choice.

use deeptravel_core::error::{DeepTravelError, Result};
use deeptravel_core::settings::{DEFAULT_MODEL, Settings, SettingsRepository};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub settings: Settings,
    /// Set once the initial load has finished, successfully or not
    pub is_ready: bool,
}

/// Owns the in-memory settings and writes changes through to the secret
/// store.
pub struct SettingsState {
    repository: Arc<dyn SettingsRepository>,
    state: watch::Sender<SettingsSnapshot>,
    write_lock: Mutex<()>,
}

impl SettingsState {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        let (state, _) = watch::channel(SettingsSnapshot::default());
        Self {
            repository,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Initial load. Only the first call has any effect.
    pub async fn load(&self) {
        let _guard = self.write_lock.lock().await;
        if self.is_ready() {
            tracing::debug!("[SettingsState] Already loaded, skipping");
            return;
        }

        let settings = match self.repository.load_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("[SettingsState] Failed to load settings: {}", e);
                Settings::default()
            }
        };

        self.state.send_modify(|state| {
            state.settings = settings;
            state.is_ready = true;
        });
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        self.state.borrow().clone()
    }

    pub fn settings(&self) -> Settings {
        self.state.borrow().settings.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready
    }

    pub fn subscribe(&self) -> watch::Receiver<SettingsSnapshot> {
        self.state.subscribe()
    }

    /// Updates the key in memory, then persists it. Persistence failures are
    /// logged only.
    pub async fn set_api_key(&self, api_key: &str) {
        self.state.send_modify(|state| state.settings.api_key = api_key.to_string());

        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.repository.save_api_key(api_key).await {
            tracing::warn!("[SettingsState] Failed to persist API key: {}", e);
        }
    }

    pub async fn set_model(&self, model: &str) {
        self.state.send_modify(|state| state.settings.model = model.to_string());

        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.repository.save_model(model).await {
            tracing::warn!("[SettingsState] Failed to persist model: {}", e);
        }
    }

    /// Settings-screen save: both values are trimmed, and an empty key is
    /// rejected before anything changes. An empty model falls back to the
    /// default model.
    pub async fn save(&self, api_key: &str, model: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(DeepTravelError::invalid_input("Enter an API key first"));
        }

        let model = match model.trim() {
            "" => DEFAULT_MODEL,
            model => model,
        };

        self.set_api_key(api_key).await;
        self.set_model(model).await;
        tracing::info!("[SettingsState] Settings saved (model: {})", model);
        Ok(())
    }
}
