//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backend.
    #[error("Failed to open storage: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Writing the value would exceed the backend's quota.
    #[error("Storage quota exceeded writing {key}: need {needed} bytes, limit {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Storage has been disabled (e.g. private browsing, user setting).
    #[error("Storage is disabled")]
    Disabled,

    /// Key is not usable by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
