//! Application context
//!
//! Built once at startup and cloned into every consumer (views, API
//! clients, the connection manager). All clones share one session store.

use parking_lot::RwLock;
use std::sync::Arc;

use haven_session::{SessionStore, UserInfo};
use haven_storage::{Database, StorageArea};

use crate::config::Config;
use crate::Result;

pub struct App {
    config: Config,
    db: Database,
    store: Arc<RwLock<SessionStore<StorageArea>>>,
}

impl App {
    /// Validate `config`, open the database and restore the session
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let db = Database::open(&config.database_path)?;
        Ok(Self::restore(config, db))
    }

    /// Same as [`App::new`] but on an already opened database
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        config.validate()?;
        Ok(Self::restore(config, db))
    }

    fn restore(config: Config, db: Database) -> Self {
        let area = StorageArea::open(db.clone(), config.storage_scope.clone());
        let store = SessionStore::hydrate(config.endpoints(), area);

        tracing::info!(
            scope = %config.storage_scope,
            authenticated = store.is_authenticated(),
            "Haven client started"
        );

        Self {
            config,
            db,
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_store<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&SessionStore<StorageArea>) -> T,
    {
        f(&self.store.read())
    }

    pub fn with_store_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SessionStore<StorageArea>) -> haven_session::Result<T>,
    {
        Ok(f(&mut self.store.write())?)
    }

    // === Session operations ===

    pub fn set_user_info(&self, user_info: UserInfo) -> Result<()> {
        self.with_store_mut(|store| store.set_user_info(user_info))
    }

    pub fn clean_user_info(&self) -> Result<()> {
        self.with_store_mut(|store| store.clean_user_info())
    }

    pub fn user_info(&self) -> UserInfo {
        self.with_store(|store| store.user_info().clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.with_store(|store| store.is_authenticated())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_session::{Hydration, SocketHandle, USER_INFO_KEY};
    use haven_storage::KeyValueStore;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config::new(PathBuf::from("/tmp/haven-test"))
    }

    fn alice() -> UserInfo {
        let mut info = UserInfo::new();
        info.insert("id", 42);
        info.insert("name", "alice");
        info
    }

    #[test]
    fn test_clones_share_one_store() {
        let db = Database::open_in_memory().unwrap();
        let app = App::with_database(test_config(), db).unwrap();
        let view = app.clone();

        app.set_user_info(alice()).unwrap();
        assert!(view.is_authenticated());
        assert_eq!(view.user_info(), alice());

        view.clean_user_info().unwrap();
        assert!(!app.is_authenticated());
        assert!(app.user_info().is_empty());
    }

    #[test]
    fn test_reads_endpoints_from_config() {
        let mut config = test_config();
        config.backend_url = "https://chat.example.com".to_string();
        config.ws_url = "wss://chat.example.com".to_string();

        let app = App::with_database(config, Database::open_in_memory().unwrap()).unwrap();
        app.with_store(|store| {
            assert_eq!(store.backend_url(), "https://chat.example.com");
            assert_eq!(store.ws_url(), "wss://chat.example.com");
        });
    }

    #[test]
    fn test_connection_manager_attaches_socket() {
        let app = App::with_database(test_config(), Database::open_in_memory().unwrap()).unwrap();
        let conn = Arc::new(app.config().ws_url.clone());

        app.with_store_mut(|store| {
            store.set_socket(Some(SocketHandle::new(&conn)));
            Ok(())
        })
        .unwrap();

        let url = app.with_store(|store| store.socket().and_then(|s| s.get::<String>()));
        assert_eq!(url.as_deref().map(String::as_str), Some("ws://localhost:8000"));
    }

    #[test]
    fn test_corrupt_slot_does_not_block_startup() {
        let db = Database::open_in_memory().unwrap();
        let config = test_config();
        StorageArea::open(db.clone(), config.storage_scope.clone())
            .set(USER_INFO_KEY, "{\"id\": 42,")
            .unwrap();

        let app = App::with_database(config, db).unwrap();
        assert!(app.user_info().is_empty());
        app.with_store(|store| {
            assert!(matches!(store.hydration(), Hydration::Discarded { .. }));
        });
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf());

        {
            let app = App::new(config.clone()).unwrap();
            app.set_user_info(alice()).unwrap();
        }

        let app = App::new(config.clone()).unwrap();
        assert_eq!(app.user_info(), alice());

        app.clean_user_info().unwrap();
        drop(app);

        let app = App::new(config).unwrap();
        assert!(!app.is_authenticated());
        app.with_store(|store| assert_eq!(store.hydration(), &Hydration::Empty));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = test_config();
        config.ws_url = "http://localhost:8000".to_string();
        assert!(App::with_database(config, Database::open_in_memory().unwrap()).is_err());
    }

    #[test]
    fn test_invalid_config_leaves_no_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path().join("data"));
        config.backend_url = "ftp://localhost:8000".to_string();

        assert!(App::new(config.clone()).is_err());
        assert!(!config.database_path.exists());
    }

    #[test]
    fn test_scope_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();
        let lookup = |key: &str| match key {
            k if k == crate::ENV_DATA_DIR => Some(data_dir.clone()),
            k if k == crate::ENV_STORAGE_SCOPE => Some("tab-3".to_string()),
            _ => None,
        };

        let app = App::new(Config::from_lookup(lookup)).unwrap();
        app.set_user_info(alice()).unwrap();

        let area = StorageArea::open(app.database().clone(), "tab-3");
        assert!(area.get(USER_INFO_KEY).unwrap().is_some());
        let other = StorageArea::open(app.database().clone(), "default");
        assert_eq!(other.get(USER_INFO_KEY).unwrap(), None);
    }

    #[test]
    fn test_init_logging_twice() {
        crate::init_logging();
        crate::init_logging();
    }
}
