//! Storage scopes inside the database

use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::database::Database;
use crate::{KeyValueStore, Result};

/// One isolated key namespace in the database.
///
/// Named scopes survive restarts; [`StorageArea::ephemeral`] scopes get a
/// fresh id and behave like the storage of a newly opened tab.
#[derive(Clone)]
pub struct StorageArea {
    db: Database,
    scope: String,
}

impl StorageArea {
    pub fn open(db: Database, scope: impl Into<String>) -> Self {
        Self {
            db,
            scope: scope.into(),
        }
    }

    pub fn ephemeral(db: Database) -> Self {
        Self::open(db, Uuid::new_v4().to_string())
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Keys present in this scope, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        self.db.with_connection(|conn| {
            let mut stmt =
                conn.prepare("SELECT key FROM kv_store WHERE scope = ?1 ORDER BY key")?;
            let keys = stmt
                .query_map([&self.scope], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(keys)
        })
    }

    /// Drop every key in this scope. Returns the number of keys removed.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM kv_store WHERE scope = ?1", [&self.scope])?)
        })?;

        tracing::debug!(scope = %self.scope, removed, "Cleared storage scope");
        Ok(removed)
    }
}

impl KeyValueStore for StorageArea {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE scope = ?1 AND key = ?2",
                    rusqlite::params![self.scope, key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv_store (scope, key, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![self.scope, key, value, updated_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(scope = %self.scope, key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "DELETE FROM kv_store WHERE scope = ?1 AND key = ?2",
                rusqlite::params![self.scope, key],
            )?;
            Ok(())
        })?;

        tracing::debug!(scope = %self.scope, key, "Removed value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let db = Database::open_in_memory().unwrap();
        let area = StorageArea::open(db, "tab-1");

        assert_eq!(area.get("userInfo").unwrap(), None);

        area.set("userInfo", r#"{"id":1}"#).unwrap();
        assert_eq!(area.get("userInfo").unwrap().as_deref(), Some(r#"{"id":1}"#));

        area.set("userInfo", r#"{"id":2}"#).unwrap();
        assert_eq!(area.get("userInfo").unwrap().as_deref(), Some(r#"{"id":2}"#));

        area.remove("userInfo").unwrap();
        assert_eq!(area.get("userInfo").unwrap(), None);

        // Removing again is a no-op
        area.remove("userInfo").unwrap();
    }

    #[test]
    fn test_scopes_are_isolated() {
        let db = Database::open_in_memory().unwrap();
        let first = StorageArea::ephemeral(db.clone());
        let second = StorageArea::ephemeral(db);
        assert_ne!(first.scope(), second.scope());

        first.set("userInfo", "{}").unwrap();
        first.set("theme", "dark").unwrap();
        assert_eq!(second.get("userInfo").unwrap(), None);
        assert_eq!(first.keys().unwrap(), vec!["theme", "userInfo"]);

        assert_eq!(first.clear().unwrap(), 2);
        assert!(first.keys().unwrap().is_empty());
    }

    #[test]
    fn test_named_scope_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haven.db");

        {
            let area = StorageArea::open(Database::open(&path).unwrap(), "default");
            area.set("userInfo", r#"{"name":"alice"}"#).unwrap();
        }

        let area = StorageArea::open(Database::open(&path).unwrap(), "default");
        assert_eq!(
            area.get("userInfo").unwrap().as_deref(),
            Some(r#"{"name":"alice"}"#)
        );
    }
}
