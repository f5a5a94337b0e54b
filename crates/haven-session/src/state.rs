//! Session state and its transitions
//!
//! ```text
//! Anonymous ──set_user_info──▶ Authenticated ──set_user_info──▶ Authenticated
//!     ▲                              │
//!     └────────clean_user_info───────┘   (clean_user_info on Anonymous is a no-op)
//! ```
//!
//! Transitions here are pure: they compute the next state and leave
//! persistence to [`crate::SessionStore`].

use serde::{Deserialize, Serialize};

use crate::socket::SocketHandle;
use crate::user_info::UserInfo;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000";

/// Server base URLs baked in at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// HTTP(S) base URL of the application server
    pub backend_url: String,
    /// WebSocket base URL of the application server
    pub ws_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    /// No user profile held
    Anonymous,
    /// A non-empty user profile is held
    Authenticated,
}

impl AuthState {
    pub fn of(user_info: &UserInfo) -> Self {
        if user_info.is_empty() {
            AuthState::Anonymous
        } else {
            AuthState::Authenticated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthState::Anonymous => "anonymous",
            AuthState::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub endpoints: Endpoints,
    pub user_info: UserInfo,
    /// Live connection, owned by the connection manager
    pub socket: Option<SocketHandle>,
}

impl SessionState {
    pub fn new(endpoints: Endpoints, user_info: UserInfo) -> Self {
        Self {
            endpoints,
            user_info,
            socket: None,
        }
    }

    /// State after a login: the profile is replaced wholesale
    pub fn with_user_info(&self, user_info: UserInfo) -> Self {
        Self {
            user_info,
            ..self.clone()
        }
    }

    /// State after a logout
    pub fn cleared(&self) -> Self {
        self.with_user_info(UserInfo::default())
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::of(&self.user_info)
    }
}
