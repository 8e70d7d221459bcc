//! Infrastructure layer of DeepTravel: file-backed stores, repositories over
//! them, configuration loading, image processing and host device providers.

pub mod config_service;
pub mod device;
pub mod image_processor;
pub mod kv_chat_history_repository;
mod kv_json;
pub mod kv_journey_repository;
pub mod kv_last_page_repository;
pub mod paths;
pub mod secret_settings_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::device::{FileImageSource, FixedLocationProvider};
pub use crate::image_processor::JpegImageProcessor;
pub use crate::kv_chat_history_repository::KvChatHistoryRepository;
pub use crate::kv_journey_repository::KvJourneyRepository;
pub use crate::kv_last_page_repository::KvLastPageRepository;
pub use crate::paths::DeepTravelPaths;
pub use crate::secret_settings_repository::SecretSettingsRepository;
pub use crate::storage::{
    FileKeyValueStore, FileSecretStore, MemoryKeyValueStore, MemorySecretStore,
};
