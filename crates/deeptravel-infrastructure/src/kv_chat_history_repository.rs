//! Key-value backed ChatHistoryRepository.

use async_trait::async_trait;
use deeptravel_core::chat::{ChatHistoryRepository, HistoryKey, Message};
use deeptravel_core::error::Result;
use deeptravel_core::storage::KeyValueStore;
use std::sync::Arc;

use crate::kv_json::{read_json, write_json};

/// Stores each history as one JSON array under
/// `chat_history_{journeyId}_{category}`.
///
/// Every save rewrites the whole array, so write cost grows with history
/// length.
#[derive(Clone)]
pub struct KvChatHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvChatHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChatHistoryRepository for KvChatHistoryRepository {
    async fn load_history(&self, key: &HistoryKey) -> Result<Vec<Message>> {
        Ok(read_json(self.store.as_ref(), &key.storage_key())
            .await?
            .unwrap_or_default())
    }

    async fn save_history(&self, key: &HistoryKey, messages: &[Message]) -> Result<()> {
        write_json(self.store.as_ref(), &key.storage_key(), messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use deeptravel_core::chat::Category;

    #[tokio::test]
    async fn test_save_uses_composite_key() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = KvChatHistoryRepository::new(store.clone());
        let key = HistoryKey::new(Some("J1"), Category::Supermarket);

        let messages = vec![Message::user(1, "hi", vec![]).unwrap()];
        repo.save_history(&key, &messages).await.unwrap();

        let raw = store
            .get_item("chat_history_J1_supermarket")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw, r#"[{"id":"1","role":"user","content":"hi"}]"#);
        assert_eq!(repo.load_history(&key).await.unwrap(), messages);
    }

    #[tokio::test]
    async fn test_missing_history_is_empty() {
        let repo = KvChatHistoryRepository::new(Arc::new(MemoryKeyValueStore::new()));
        let key = HistoryKey::new(None, Category::Menu);
        assert!(repo.load_history(&key).await.unwrap().is_empty());
    }
}
