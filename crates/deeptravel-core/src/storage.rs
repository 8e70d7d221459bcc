//! Storage collaborator traits.
//!
//! The application persists everything through two asynchronous string
//! stores. Neither offers transactions: every call is an independent write.

use async_trait::async_trait;

use crate::error::Result;

/// An asynchronous, string-keyed key-value store.
///
/// Values are opaque serialized text. A missing key is `Ok(None)`, never an
/// error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// An asynchronous store for credentials.
///
/// Implementations are expected to protect values at rest (restricted file
/// permissions, OS keychain, ...). Secret values must never be logged.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, key: &str) -> Result<Option<String>>;

    async fn set_secret(&self, key: &str, value: &str) -> Result<()>;

    async fn delete_secret(&self, key: &str) -> Result<()>;
}
