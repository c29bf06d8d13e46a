//! Error types for the fallible seams: durable storage and the REST API.
//!
//! Neither escapes the table core. `PersistentValue` logs and absorbs
//! storage errors; the data loaders turn fetch errors into empty results.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage rejected write for key \"{key}\": {reason}")]
    WriteRejected { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
