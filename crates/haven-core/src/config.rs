//! Client configuration
//!
//! Server endpoints are decided by the build/deploy step and handed in here;
//! they do not change while the process runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use haven_session::Endpoints;

use crate::error::CoreError;
use crate::Result;

pub const ENV_BACKEND_URL: &str = "HAVEN_BACKEND_URL";
pub const ENV_WS_URL: &str = "HAVEN_WS_URL";
pub const ENV_DATA_DIR: &str = "HAVEN_DATA_DIR";
pub const ENV_STORAGE_SCOPE: &str = "HAVEN_STORAGE_SCOPE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP(S) base URL of the application server
    pub backend_url: String,
    /// WebSocket base URL of the application server
    pub ws_url: String,
    /// Path to the database file
    pub database_path: PathBuf,
    /// Storage scope holding this client's session slot
    pub storage_scope: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let endpoints = Endpoints::default();

        Self {
            backend_url: endpoints.backend_url,
            ws_url: endpoints.ws_url,
            database_path: data_dir.join("haven.db"),
            storage_scope: "default".to_string(),
        }
    }

    /// Defaults overridden by `HAVEN_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);
        let mut config = Self::new(data_dir);

        if let Some(url) = lookup(ENV_BACKEND_URL) {
            config.backend_url = url;
        }
        if let Some(url) = lookup(ENV_WS_URL) {
            config.ws_url = url;
        }
        if let Some(scope) = lookup(ENV_STORAGE_SCOPE) {
            config.storage_scope = scope;
        }

        config
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Haven"))
            .unwrap_or_else(|| PathBuf::from(".haven"))
    }

    /// Check both endpoints are `scheme://host[:port]` with a matching scheme
    pub fn validate(&self) -> Result<()> {
        validate_base_url("backend_url", &self.backend_url, &["http", "https"])?;
        validate_base_url("ws_url", &self.ws_url, &["ws", "wss"])?;

        if self.storage_scope.trim().is_empty() {
            return Err(CoreError::Config(
                "storage scope cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            backend_url: self.backend_url.clone(),
            ws_url: self.ws_url.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

fn validate_base_url(field: &'static str, raw: &str, schemes: &[&str]) -> Result<()> {
    let invalid = |reason: String| CoreError::InvalidUrl { field, reason };

    let url = Url::parse(raw).map_err(|e| invalid(format!("'{raw}' is not a URL: {e}")))?;

    if !schemes.contains(&url.scheme()) {
        return Err(invalid(format!(
            "scheme '{}' not allowed, expected one of {}",
            url.scheme(),
            schemes.join(", ")
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(format!("'{raw}' has no host")));
    }

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!("'{raw}' must be scheme://host[:port]")));
    }

    Ok(())
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
