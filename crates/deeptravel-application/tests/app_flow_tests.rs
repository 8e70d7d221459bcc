//! End-to-end flows over real key-value storage.

use async_trait::async_trait;
use deeptravel_application::stub_assistant::STUB_REPLY;
use deeptravel_application::{
    AttachmentPipeline, ChatSender, ChatSession, JourneyRegistry, NavigationService, SettingsState,
    StubAssistant,
};
use deeptravel_core::assistant::{AssistantBackend, AssistantRequest};
use deeptravel_core::attachment::{
    Attachment, GeoFix, ImageProcessor, ImageSource, LocationProvider, PermissionStatus,
};
use deeptravel_core::chat::{Category, HistoryKey, Message, MessageRole};
use deeptravel_core::error::{DeepTravelError, Result};
use deeptravel_core::navigation::{LastPage, LastPageRepository, RestoreOutcome, Screen};
use deeptravel_core::settings::DEFAULT_MODEL;
use deeptravel_core::storage::KeyValueStore;
use deeptravel_infrastructure::{
    FileKeyValueStore, KvChatHistoryRepository, KvJourneyRepository, KvLastPageRepository,
    MemoryKeyValueStore, MemorySecretStore, SecretSettingsRepository,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

async fn file_store(dir: &TempDir) -> Arc<dyn KeyValueStore> {
    Arc::new(FileKeyValueStore::new(dir.path().join("kv")).await.unwrap())
}

async fn loaded_registry(store: Arc<dyn KeyValueStore>) -> Arc<JourneyRegistry> {
    let registry = Arc::new(JourneyRegistry::new(Arc::new(KvJourneyRepository::new(store))));
    registry.load().await;
    registry
}

struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Denied)
    }

    async fn current_position(&self) -> Result<GeoFix> {
        Err(DeepTravelError::permission_denied("location"))
    }
}

struct FixedLocation(GeoFix);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<GeoFix> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct RecordingAssistant {
    requests: Mutex<Vec<AssistantRequest>>,
}

#[async_trait]
impl AssistantBackend for RecordingAssistant {
    async fn reply(&self, request: &AssistantRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok("noted".to_string())
    }
}

struct OnePhoto;

#[async_trait]
impl ImageSource for OnePhoto {
    async fn request_camera_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn capture_photo(&self) -> Result<Option<PathBuf>> {
        Ok(Some(PathBuf::from("menu.jpg")))
    }

    async fn request_library_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn pick_from_library(&self, _limit: usize) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

struct EchoProcessor;

#[async_trait]
impl ImageProcessor for EchoProcessor {
    async fn process(&self, source: &Path) -> Result<Attachment> {
        Ok(Attachment {
            uri: format!("/cache/{}", source.display()),
            base64: Some("/9j/AAAA".to_string()),
        })
    }
}

/// Delays every read so writes can race a reload.
struct SlowReads(MemoryKeyValueStore);

#[async_trait]
impl KeyValueStore for SlowReads {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.0.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.0.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.0.remove_item(key).await
    }
}

/// Answers after a delay, long enough for the user to change screens.
struct SlowAssistant;

#[async_trait]
impl AssistantBackend for SlowAssistant {
    async fn reply(&self, _request: &AssistantRequest) -> Result<String> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok("late menu reply".to_string())
    }
}

fn contents(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|m| m.content.as_str()).collect()
}

#[tokio::test]
async fn added_journeys_append_with_unique_ids_and_survive_reload() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir).await;
    let registry = loaded_registry(store.clone()).await;

    let first = registry.add_journey("Tokyo", "Japan").await.unwrap();
    let second = registry.add_journey("Tokyo", "Japan").await.unwrap();
    assert_ne!(first.id, second.id);

    let journeys = registry.list_journeys();
    let last = journeys.last().unwrap();
    assert_eq!(last.name, "Tokyo");
    assert_eq!(last.country, "Japan");
    assert_eq!(registry.current_journey_id(), Some(second.id.clone()));

    let reloaded = loaded_registry(store).await;
    assert_eq!(reloaded.list_journeys(), journeys);
    assert_eq!(reloaded.current_journey_id(), Some(second.id));
}

#[tokio::test]
async fn blank_journey_name_changes_nothing() {
    let registry = loaded_registry(Arc::new(MemoryKeyValueStore::new())).await;
    let existing = registry.add_journey("Hanoi", "Vietnam").await.unwrap();

    assert!(registry.add_journey("   ", "Vietnam").await.is_none());
    assert!(registry.add_journey("", "").await.is_none());

    assert_eq!(registry.list_journeys().len(), 1);
    assert_eq!(registry.current_journey_id(), Some(existing.id));
}

#[tokio::test]
async fn clearing_current_journey_is_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir).await;
    let registry = loaded_registry(store.clone()).await;
    registry.add_journey("Rome", "Italy").await.unwrap();

    registry.set_current_journey(None).await;
    assert!(registry.current_journey().is_none());

    let reloaded = loaded_registry(store).await;
    assert!(reloaded.current_journey_id().is_none());
    assert!(reloaded.current_journey().is_none());
}

#[tokio::test]
async fn user_message_lands_only_in_its_own_history() {
    let temp_dir = TempDir::new().unwrap();
    let history = Arc::new(KvChatHistoryRepository::new(file_store(&temp_dir).await));

    let menu = HistoryKey::new(Some("J1"), Category::Menu);
    let supermarket = HistoryKey::new(Some("J1"), Category::Supermarket);

    let session = ChatSession::open(history.clone(), supermarket.clone()).await;
    session.append_user_message(1, "older", Vec::new()).await.unwrap();

    session.switch_to(menu.clone()).await;
    session.append_user_message(2, "first", Vec::new()).await.unwrap();
    let sent = session.append_user_message(3, "What is okonomiyaki?", Vec::new()).await.unwrap();

    let loaded = session.load_history(&menu).await;
    assert_eq!(loaded.last(), Some(&sent));

    let other = session.load_history(&supermarket).await;
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].content, "older");
}

#[tokio::test]
async fn restoration_selects_journey_then_redirects_once() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let registry = loaded_registry(store.clone()).await;
    let journey = registry.add_journey("Kyoto", "Japan").await.unwrap();
    registry.set_current_journey(None).await;

    let pages = Arc::new(KvLastPageRepository::new(store.clone()));
    pages
        .save_last_page(&LastPage::new(Screen::Menu, Some(&journey.id)))
        .await
        .unwrap();

    let navigation = NavigationService::new(pages, registry.clone());
    let outcome = navigation.restore_once().await;

    assert_eq!(
        outcome,
        Some(RestoreOutcome::Redirect {
            screen: Screen::Menu,
            journey_id: Some(journey.id.clone()),
        })
    );
    assert_eq!(registry.current_journey(), Some(journey));
    assert!(navigation.phase().await.is_done());
    assert_eq!(navigation.restore_once().await, None);
}

#[tokio::test]
async fn restoration_with_dangling_journey_is_harmless() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    store
        .set_item("last_page", r#"{"screen":"attractions","journeyId":"deleted-trip"}"#)
        .await
        .unwrap();
    let registry = loaded_registry(store.clone()).await;
    let navigation =
        NavigationService::new(Arc::new(KvLastPageRepository::new(store)), registry.clone());

    let outcome = navigation.restore_once().await.unwrap();

    assert!(matches!(outcome, RestoreOutcome::Redirect { screen: Screen::Attractions, .. }));
    assert_eq!(registry.current_journey_id().as_deref(), Some("deleted-trip"));
    assert!(registry.current_journey().is_none());
}

#[tokio::test]
async fn restoration_without_record_or_with_garbage_stays_on_landing() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let registry = loaded_registry(store.clone()).await;
    let pages = Arc::new(KvLastPageRepository::new(store.clone()));

    let navigation = NavigationService::new(pages.clone(), registry.clone());
    assert_eq!(navigation.restore_once().await, Some(RestoreOutcome::StayOnLanding));

    store.set_item("last_page", "{not json").await.unwrap();
    let navigation = NavigationService::new(pages, registry.clone());
    assert_eq!(navigation.restore_once().await, Some(RestoreOutcome::StayOnLanding));
    assert!(registry.current_journey_id().is_none());
}

#[tokio::test]
async fn visits_record_screen_and_current_journey() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let registry = loaded_registry(store.clone()).await;
    let pages = Arc::new(KvLastPageRepository::new(store));
    let navigation = NavigationService::new(pages.clone(), registry.clone());

    navigation.record_visit(Screen::Trip).await;
    assert_eq!(pages.load_last_page().await.unwrap(), Some(LastPage::new(Screen::Trip, None)));

    let journey = registry.add_journey("Taipei", "Taiwan").await.unwrap();
    navigation.record_visit(Screen::Supermarket).await;
    assert_eq!(
        pages.load_last_page().await.unwrap(),
        Some(LastPage::new(Screen::Supermarket, Some(&journey.id)))
    );
}

#[tokio::test]
async fn empty_send_is_rejected_and_image_only_send_uses_placeholder() {
    let history = Arc::new(KvChatHistoryRepository::new(Arc::new(MemoryKeyValueStore::new())));
    let key = HistoryKey::new(Some("J1"), Category::Menu);
    let session = ChatSession::open(history, key.clone()).await;
    let sender = ChatSender::new(Arc::new(DeniedLocation), Arc::new(StubAssistant));

    session.set_draft("   ");
    assert!(sender.send(&session, "gpt-4o-mini").await.is_none());
    assert!(session.messages().is_empty());

    let pipeline = AttachmentPipeline::new(Arc::new(OnePhoto), Arc::new(EchoProcessor), 10);
    assert_eq!(pipeline.capture(&session).await.unwrap(), 1);
    session.set_draft("");

    let outcome = sender.send(&session, "gpt-4o-mini").await.unwrap();
    assert_eq!(outcome.user_message.content, "(1 image)");
    assert_eq!(
        outcome.user_message.image_uris,
        Some(vec!["/cache/menu.jpg".to_string()])
    );
    assert!(outcome.location.is_none());

    let reply = outcome.reply.unwrap();
    assert_eq!(reply.role, MessageRole::Assistant);
    assert_eq!(reply.content, STUB_REPLY);
    assert!(reply.id.ends_with("-bot"));

    let snapshot = session.snapshot();
    assert!(snapshot.draft.is_empty());
    assert!(snapshot.pending.is_empty());
    assert_eq!(snapshot.messages.len(), 2);
}

#[tokio::test]
async fn send_bundles_text_images_location_and_context() {
    let history = Arc::new(KvChatHistoryRepository::new(Arc::new(MemoryKeyValueStore::new())));
    let session = ChatSession::open(history, HistoryKey::new(Some("J9"), Category::Attractions)).await;
    let fix = GeoFix {
        latitude: 48.8584,
        longitude: 2.2945,
        accuracy: Some(12.0),
    };
    let assistant = Arc::new(RecordingAssistant::default());
    let sender = ChatSender::new(Arc::new(FixedLocation(fix)), assistant.clone());

    AttachmentPipeline::new(Arc::new(OnePhoto), Arc::new(EchoProcessor), 10)
        .capture(&session)
        .await
        .unwrap();
    session.set_draft("  Who built this?  ");

    let outcome = sender.send(&session, "gpt-4.1").await.unwrap();
    assert_eq!(outcome.user_message.content, "Who built this?");
    assert_eq!(outcome.location, Some(fix));

    let requests = assistant.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.text, "Who built this?");
    assert_eq!(request.images_base64, vec!["/9j/AAAA".to_string()]);
    assert_eq!(request.journey_id.as_deref(), Some("J9"));
    assert_eq!(request.category, Category::Attractions);
    assert_eq!(request.model, "gpt-4.1");
}

#[tokio::test]
async fn late_reply_goes_to_the_history_it_was_sent_from() {
    let history = Arc::new(KvChatHistoryRepository::new(Arc::new(MemoryKeyValueStore::new())));
    let menu = HistoryKey::new(Some("J1"), Category::Menu);
    let attractions = HistoryKey::new(Some("J1"), Category::Attractions);
    let session = ChatSession::open(history, menu.clone()).await;
    let sender = ChatSender::new(Arc::new(DeniedLocation), Arc::new(SlowAssistant));

    session.set_draft("what is this dish?");
    let (outcome, _) = tokio::join!(sender.send(&session, "gpt-4o-mini"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.switch_to(attractions.clone()).await;
    });

    assert_eq!(outcome.unwrap().reply.unwrap().content, "late menu reply");
    assert!(session.messages().is_empty());
    assert_eq!(session.key(), attractions);
    assert!(session.load_history(&attractions).await.is_empty());
    assert_eq!(
        contents(&session.load_history(&menu).await),
        vec!["what is this dish?", "late menu reply"]
    );
}

#[tokio::test]
async fn append_during_switch_keeps_stored_history() {
    let store = Arc::new(SlowReads(MemoryKeyValueStore::new()));
    store
        .set_item(
            "chat_history_J1_supermarket",
            r#"[{"id":"1","role":"user","content":"old question"}]"#,
        )
        .await
        .unwrap();
    let history = Arc::new(KvChatHistoryRepository::new(store));
    let market = HistoryKey::new(Some("J1"), Category::Supermarket);
    let session = ChatSession::open(history, HistoryKey::new(Some("J1"), Category::Menu)).await;

    tokio::join!(session.switch_to(market.clone()), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.append_user_message(2, "new question", Vec::new()).await;
    });

    assert_eq!(contents(&session.messages()), vec!["old question", "new question"]);
    assert_eq!(
        contents(&session.load_history(&market).await),
        vec!["old question", "new question"]
    );
}

#[tokio::test]
async fn malformed_journey_blob_loads_as_empty() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set_item("journeys", "[{\"id\": 1,").await.unwrap();

    let registry = loaded_registry(store).await;

    assert!(registry.is_loaded());
    assert!(registry.list_journeys().is_empty());
}

#[tokio::test]
async fn malformed_chat_history_opens_empty() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set_item("chat_history_J1_menu", "not json").await.unwrap();
    let history = Arc::new(KvChatHistoryRepository::new(store));

    let session = ChatSession::open(history, HistoryKey::new(Some("J1"), Category::Menu)).await;

    assert!(session.messages().is_empty());
}

#[tokio::test]
async fn failed_writes_leave_memory_state_and_empty_store() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set_fail_writes(true);
    let registry = loaded_registry(store.clone()).await;

    let journey = registry.add_journey("Busan", "Korea").await.unwrap();

    assert_eq!(registry.current_journey(), Some(journey));
    assert!(store.is_empty().await);

    store.set_fail_writes(false);
    registry.set_current_journey(None).await;
    registry.add_journey("Jeju", "Korea").await.unwrap();
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn unreadable_secrets_still_mark_settings_ready() {
    let secrets = Arc::new(MemorySecretStore::new());
    secrets.set_fail_reads(true);
    secrets.set_fail_writes(true);
    let settings = SettingsState::new(Arc::new(SecretSettingsRepository::new(secrets)));

    settings.load().await;
    assert!(settings.is_ready());
    assert!(!settings.settings().has_api_key());
    assert_eq!(settings.settings().model, DEFAULT_MODEL);

    settings.save("sk-new", "").await.unwrap();
    assert_eq!(settings.settings().api_key, "sk-new");
}
