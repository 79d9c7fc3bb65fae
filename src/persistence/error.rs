//! Error types for the storage adapters.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted values.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed (disk, permissions, ...).
    #[error("Storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The adapter refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The cart could not be encoded for storage.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}
