//! Haven Core
//!
//! Application-scoped context for the Haven chat client.
//! One [`App`] is built at startup and handed to every consumer; there is no
//! module-level global.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::{
    Config, ENV_BACKEND_URL, ENV_DATA_DIR, ENV_STORAGE_SCOPE, ENV_WS_URL,
};
pub use error::CoreError;

// Re-export core components
pub use haven_session::{
    AuthState, Endpoints, Hydration, SessionError, SessionState, SessionStore, SocketHandle,
    UserInfo, USER_INFO_KEY,
};
pub use haven_storage::{Database, KeyValueStore, MemoryStore, StorageArea, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
