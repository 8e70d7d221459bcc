//! JSON helpers shared by the key-value repositories.

use deeptravel_core::error::{DeepTravelError, Result};
use deeptravel_core::storage::KeyValueStore;
use serde::{Serialize, de::DeserializeOwned};

/// Reads and parses the JSON value under `key`.
///
/// A missing key is `Ok(None)`; a malformed value is a serialization error
/// naming the key.
pub(crate) async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = store.get_item(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DeepTravelError::Serialization {
            format: "JSON".to_string(),
            message: format!("key '{}': {}", key, e),
        })
}

/// Serializes `value` and stores it under `key`.
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set_item(key, &json).await
}
