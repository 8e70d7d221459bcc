//! Composition root: resolves paths, loads config, starts logging and wires
//! the stores, repositories and state owners together.

use anyhow::{Context, Result};
use deeptravel_application::{ChatSession, JourneyRegistry, NavigationService, SettingsState};
use deeptravel_core::chat::{Category, ChatHistoryRepository, HistoryKey};
use deeptravel_core::config::AppConfig;
use deeptravel_core::storage::{KeyValueStore, SecretStore};
use deeptravel_infrastructure::{
    ConfigService, DeepTravelPaths, FileKeyValueStore, FileSecretStore, JpegImageProcessor,
    KvChatHistoryRepository, KvJourneyRepository, KvLastPageRepository, SecretSettingsRepository,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

use crate::logging::init_logging;

pub struct AppContext {
    pub config: AppConfig,
    pub config_service: ConfigService,
    pub journeys: Arc<JourneyRegistry>,
    pub settings: Arc<SettingsState>,
    pub navigation: NavigationService,
    history: Arc<dyn ChatHistoryRepository>,
    attachments_dir: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    /// Opens the chat for `category` in the current journey.
    pub async fn open_chat(&self, category: Category) -> ChatSession {
        let journey_id = self.journeys.current_journey_id();
        ChatSession::open(
            self.history.clone(),
            HistoryKey::new(journey_id.as_deref(), category),
        )
        .await
    }

    pub fn image_processor(&self) -> JpegImageProcessor {
        JpegImageProcessor::new(self.attachments_dir.clone(), &self.config.attachments)
    }
}

/// Builds the application and runs the initial loads.
pub async fn bootstrap(base_dir: Option<&Path>) -> Result<AppContext> {
    let paths = DeepTravelPaths::from_env(base_dir);

    let config_service =
        ConfigService::new(&paths).context("Failed to resolve config location")?;
    let config = config_service.load_or_create();
    let paths = paths.with_data_dir(config.storage.data_dir.clone());

    let logs_dir = paths.logs_dir().context("Failed to resolve log directory")?;
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Cannot create log directory {}: {}", logs_dir.display(), e);
    }
    let log_guard = init_logging(&config.logging, Some(logs_dir.as_path()));

    tracing::info!("[Bootstrap] Config loaded");

    let kv_dir = paths.kv_dir().context("Failed to resolve data directory")?;
    let kv_store: Arc<dyn KeyValueStore> = Arc::new(
        FileKeyValueStore::new(&kv_dir)
            .await
            .with_context(|| format!("Failed to open store at {}", kv_dir.display()))?,
    );
    let secret_store: Arc<dyn SecretStore> = Arc::new(FileSecretStore::with_path(
        paths.secret_file().context("Failed to resolve secret file")?,
    ));

    let journeys = Arc::new(JourneyRegistry::new(Arc::new(KvJourneyRepository::new(
        kv_store.clone(),
    ))));
    let settings = Arc::new(SettingsState::new(Arc::new(SecretSettingsRepository::new(
        secret_store,
    ))));
    let navigation = NavigationService::new(
        Arc::new(KvLastPageRepository::new(kv_store.clone())),
        journeys.clone(),
    );

    tokio::join!(journeys.load(), settings.load());

    tracing::debug!(
        "[Bootstrap] {} journeys, settings ready: {}",
        journeys.list_journeys().len(),
        settings.is_ready()
    );

    Ok(AppContext {
        journeys,
        settings,
        navigation,
        history: Arc::new(KvChatHistoryRepository::new(kv_store)),
        attachments_dir: paths
            .attachments_dir()
            .context("Failed to resolve attachments directory")?,
        config,
        config_service,
        _log_guard: log_guard,
    })
}
