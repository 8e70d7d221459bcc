//! Application layer of DeepTravel.
//!
//! Each state owner keeps its current value in a `tokio::sync::watch`
//! channel: callers read snapshots synchronously and `subscribe()` to be
//! notified of changes. Persistence goes through the repository traits of
//! `deeptravel-core`; write failures are logged and swallowed.

pub mod chat;
pub mod journey_registry;
pub mod navigation_service;
pub mod settings_state;
pub mod stub_assistant;

pub use chat::{
    AttachmentPipeline, ChatPrecondition, ChatSender, ChatSession, ChatSnapshot, SendOutcome,
    check_chat_preconditions,
};
pub use journey_registry::{JourneyRegistry, JourneySnapshot};
pub use navigation_service::NavigationService;
pub use settings_state::{SettingsSnapshot, SettingsState};
pub use stub_assistant::StubAssistant;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
