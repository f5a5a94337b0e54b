//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Write to '{key}' rejected: {reason}")]
    WriteRejected { key: String, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
