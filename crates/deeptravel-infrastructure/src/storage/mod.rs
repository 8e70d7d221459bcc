//! Storage layer: atomic file primitives and the concrete stores.

mod atomic_toml;
mod atomic_write;
mod file_kv_store;
mod memory_store;
mod secret_storage;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_kv_store::FileKeyValueStore;
pub use memory_store::{MemoryKeyValueStore, MemorySecretStore};
pub use secret_storage::FileSecretStore;
