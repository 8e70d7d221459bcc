//! Chat history keying and persistence trait.

use async_trait::async_trait;

use super::category::Category;
use super::message::Message;
use crate::error::Result;

/// Prefix of every chat history storage key.
pub const CHAT_HISTORY_KEY_PREFIX: &str = "chat_history_";
/// Journey id used in history keys when no journey is selected.
pub const NO_JOURNEY_SENTINEL: &str = "no_journey";

/// Identifies one chat history: a (journey, category) pair.
///
/// Distinct pairs always map to distinct storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    pub journey_id: Option<String>,
    pub category: Category,
}

impl HistoryKey {
    pub fn new(journey_id: Option<&str>, category: Category) -> Self {
        Self {
            journey_id: journey_id.map(str::to_string),
            category,
        }
    }

    /// Journey segment of the storage key.
    pub fn journey_segment(&self) -> &str {
        self.journey_id.as_deref().unwrap_or(NO_JOURNEY_SENTINEL)
    }

    /// Returns `chat_history_{journeyId}_{category}`.
    pub fn storage_key(&self) -> String {
        format!(
            "{}{}_{}",
            CHAT_HISTORY_KEY_PREFIX,
            self.journey_segment(),
            self.category
        )
    }
}

/// Persistence for chat histories.
///
/// The whole sequence is written on every save.
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// Loads the history for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(vec![])`: No history stored yet
    /// - `Err(_)`: Read failed or the stored blob is malformed
    async fn load_history(&self, key: &HistoryKey) -> Result<Vec<Message>>;

    async fn save_history(&self, key: &HistoryKey, messages: &[Message]) -> Result<()>;
}
