//! Key-value backed LastPageRepository.

use async_trait::async_trait;
use deeptravel_core::error::Result;
use deeptravel_core::navigation::{LAST_PAGE_KEY, LastPage, LastPageRepository};
use deeptravel_core::storage::KeyValueStore;
use std::sync::Arc;

use crate::kv_json::{read_json, write_json};

#[derive(Clone)]
pub struct KvLastPageRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvLastPageRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LastPageRepository for KvLastPageRepository {
    async fn load_last_page(&self) -> Result<Option<LastPage>> {
        read_json(self.store.as_ref(), LAST_PAGE_KEY).await
    }

    async fn save_last_page(&self, page: &LastPage) -> Result<()> {
        write_json(self.store.as_ref(), LAST_PAGE_KEY, page).await
    }
}
