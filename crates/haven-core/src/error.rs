//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] haven_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] haven_session::SessionError),

    #[error("Invalid {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
