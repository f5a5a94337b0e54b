//! Session store
//!
//! Owns the session state and keeps the user profile mirrored in a
//! [`KeyValueStore`] slot. Each mutation writes the slot first and only
//! commits the new in-memory state once the write succeeded.

use haven_storage::KeyValueStore;

use crate::socket::SocketHandle;
use crate::state::{AuthState, Endpoints, SessionState};
use crate::user_info::UserInfo;
use crate::Result;

/// Storage key holding the serialized user profile
pub const USER_INFO_KEY: &str = "userInfo";

/// How the store was seeded at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// No persisted profile
    Empty,
    /// Profile restored from storage
    Restored,
    /// A persisted value existed but could not be used; started anonymous
    Discarded { reason: String },
}

pub struct SessionStore<S> {
    state: SessionState,
    storage: S,
    hydration: Hydration,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Build the store, restoring the user profile from `storage`.
    ///
    /// Never fails: an unreadable or malformed slot yields an anonymous
    /// session and is reported through [`SessionStore::hydration`].
    pub fn hydrate(endpoints: Endpoints, storage: S) -> Self {
        let (user_info, hydration) = load_user_info(&storage);
        let state = SessionState::new(endpoints, user_info);

        tracing::info!(
            auth_state = %state.auth_state(),
            backend_url = %state.endpoints.backend_url,
            ws_url = %state.endpoints.ws_url,
            "Initialized session store"
        );

        Self {
            state,
            storage,
            hydration,
        }
    }

    /// Replace the user profile and persist it.
    ///
    /// On error neither memory nor storage has changed.
    pub fn set_user_info(&mut self, user_info: UserInfo) -> Result<()> {
        let serialized = serde_json::to_string(&user_info)?;
        let next = self.state.with_user_info(user_info);

        self.storage.set(USER_INFO_KEY, &serialized)?;

        let from = self.state.auth_state();
        self.state = next;

        tracing::info!(
            from = %from,
            to = %self.state.auth_state(),
            fields = self.state.user_info.len(),
            "User info set"
        );

        Ok(())
    }

    /// Forget the user profile and drop the persisted copy. Idempotent.
    pub fn clean_user_info(&mut self) -> Result<()> {
        let next = self.state.cleared();

        self.storage.remove(USER_INFO_KEY)?;

        let from = self.state.auth_state();
        self.state = next;

        tracing::info!(from = %from, "User info cleared");

        Ok(())
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.state.user_info
    }

    pub fn backend_url(&self) -> &str {
        &self.state.endpoints.backend_url
    }

    pub fn ws_url(&self) -> &str {
        &self.state.endpoints.ws_url
    }

    pub fn socket(&self) -> Option<&SocketHandle> {
        self.state.socket.as_ref()
    }

    /// Attach or detach the connection manager's handle
    pub fn set_socket(&mut self, socket: Option<SocketHandle>) {
        tracing::debug!(attached = socket.is_some(), "Socket handle updated");
        self.state.socket = socket;
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.auth_state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }

    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn load_user_info<S: KeyValueStore>(storage: &S) -> (UserInfo, Hydration) {
    let raw = match storage.get(USER_INFO_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (UserInfo::default(), Hydration::Empty),
        Err(e) => return discard(format!("storage read failed: {e}")),
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => match UserInfo::try_from(value) {
            Ok(user_info) => (user_info, Hydration::Restored),
            Err(other) => discard(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )),
        },
        Err(e) => discard(format!("invalid JSON: {e}")),
    }
}

fn discard(reason: String) -> (UserInfo, Hydration) {
    tracing::warn!(key = USER_INFO_KEY, %reason, "Discarding persisted user info");
    (UserInfo::default(), Hydration::Discarded { reason })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
