//! Haven Session State
//!
//! Holds the signed-in user's profile, the server endpoints, and a reference
//! to the live chat connection.
//!
//! - The user profile is mirrored to a storage slot on every mutation
//! - Memory and the slot never diverge: a failed write leaves both untouched
//! - Startup restores the profile from the slot; an unusable slot means anonymous

mod error;
mod socket;
mod state;
mod store;
mod user_info;

pub use error::SessionError;
pub use socket::SocketHandle;
pub use state::{AuthState, Endpoints, SessionState};
pub use store::{Hydration, SessionStore, USER_INFO_KEY};
pub use user_info::UserInfo;

pub type Result<T> = std::result::Result<T, SessionError>;
