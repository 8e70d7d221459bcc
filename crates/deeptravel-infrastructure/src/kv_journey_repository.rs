//! Key-value backed JourneyRepository.

use async_trait::async_trait;
use deeptravel_core::error::Result;
use deeptravel_core::journey::{CURRENT_JOURNEY_KEY, JOURNEYS_KEY, Journey, JourneyRepository};
use deeptravel_core::storage::KeyValueStore;
use std::sync::Arc;

use crate::kv_json::{read_json, write_json};

/// Stores the journey list as a JSON array under `journeys` and the current
/// id as a bare string under `current_journey_id`.
#[derive(Clone)]
pub struct KvJourneyRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvJourneyRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JourneyRepository for KvJourneyRepository {
    async fn load_journeys(&self) -> Result<Vec<Journey>> {
        Ok(read_json(self.store.as_ref(), JOURNEYS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save_journeys(&self, journeys: &[Journey]) -> Result<()> {
        write_json(self.store.as_ref(), JOURNEYS_KEY, journeys).await
    }

    async fn load_current_journey_id(&self) -> Result<Option<String>> {
        let id = self.store.get_item(CURRENT_JOURNEY_KEY).await?;
        Ok(id.filter(|id| !id.is_empty()))
    }

    async fn save_current_journey_id(&self, journey_id: Option<&str>) -> Result<()> {
        match journey_id {
            Some(id) if !id.is_empty() => self.store.set_item(CURRENT_JOURNEY_KEY, id).await,
            _ => self.store.remove_item(CURRENT_JOURNEY_KEY).await,
        }
    }
}
