//! In-memory key-value store

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StorageError;
use crate::{KeyValueStore, Result};

#[derive(Default)]
struct Inner {
    entries: HashMap<String, String>,
    reject_writes: bool,
    reject_reads: bool,
}

/// A `HashMap`-backed store. Clones share the same entries.
///
/// Writes and reads can be switched off to stand in for a full or disabled
/// storage backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.inner.lock().reject_writes = reject;
    }

    pub fn set_reject_reads(&self, reject: bool) {
        self.inner.lock().reject_reads = reject;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock();
        if inner.reject_reads {
            return Err(StorageError::Unavailable(format!(
                "reads disabled while fetching '{key}'"
            )));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.reject_writes {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.reject_writes {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "storage disabled".to_string(),
            });
        }
        inner.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let view = store.clone();

        store.set("userInfo", "{}").unwrap();
        assert_eq!(view.get("userInfo").unwrap().as_deref(), Some("{}"));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_rejected_write_keeps_entries() {
        let store = MemoryStore::with_entry("userInfo", r#"{"id":1}"#);
        store.set_reject_writes(true);

        let err = store.set("userInfo", r#"{"id":2}"#).unwrap_err();
        assert!(matches!(err, StorageError::WriteRejected { .. }));
        assert!(store.remove("userInfo").is_err());

        store.set_reject_writes(false);
        assert_eq!(
            store.get("userInfo").unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );
    }

    #[test]
    fn test_rejected_read() {
        let store = MemoryStore::with_entry("userInfo", "{}");
        store.set_reject_reads(true);
        assert!(matches!(
            store.get("userInfo"),
            Err(StorageError::Unavailable(_))
        ));
    }
}
