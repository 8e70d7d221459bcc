//! Last-page repository trait.

use async_trait::async_trait;

use super::model::LastPage;
use crate::error::Result;

/// Storage key of the last-page record.
pub const LAST_PAGE_KEY: &str = "last_page";

#[async_trait]
pub trait LastPageRepository: Send + Sync {
    /// Reads the record.
    ///
    /// # Returns
    ///
    /// - `Ok(None)`: Nothing recorded yet
    /// - `Err(_)`: Read failed or the record is malformed
    async fn load_last_page(&self) -> Result<Option<LastPage>>;

    /// Overwrites the record.
    async fn save_last_page(&self, page: &LastPage) -> Result<()>;
}
