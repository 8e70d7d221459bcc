//! Journey repository trait.

use async_trait::async_trait;

use super::model::Journey;
use crate::error::Result;

/// Storage key holding the ordered journey list.
pub const JOURNEYS_KEY: &str = "journeys";
/// Storage key holding the current journey id.
pub const CURRENT_JOURNEY_KEY: &str = "current_journey_id";

/// Persistence for the journey list and the current-journey selection.
///
/// The list and the selection are written independently; there is no
/// atomicity between the two.
#[async_trait]
pub trait JourneyRepository: Send + Sync {
    /// Loads the persisted journeys in insertion order.
    ///
    /// # Returns
    ///
    /// - `Ok(vec![])`: Nothing persisted yet
    /// - `Err(_)`: Read failed or the stored blob is malformed
    async fn load_journeys(&self) -> Result<Vec<Journey>>;

    /// Replaces the persisted journey list with `journeys`.
    async fn save_journeys(&self, journeys: &[Journey]) -> Result<()>;

    async fn load_current_journey_id(&self) -> Result<Option<String>>;

    /// Persists the selection, or removes it when `journey_id` is `None`.
    async fn save_current_journey_id(&self, journey_id: Option<&str>) -> Result<()>;
}
