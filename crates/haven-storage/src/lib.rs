//! Haven Storage Layer
//!
//! SQLite-backed key-value storage for client state.
//! A storage scope is the local equivalent of one browser tab's session
//! storage: a flat string-to-string map that no other scope can see.

mod area;
mod database;
mod error;
mod memory;
mod migrations;

pub use area::StorageArea;
pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// A flat string key-value slot store.
///
/// Implementations use interior mutability so a store can be shared by
/// reference between the component that owns the state and its readers.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
