//! Cart error types.

use bandstore_storage::StorageError;
use thiserror::Error;

/// Errors returned by cart store operations.
///
/// Missing items are never errors: removing or updating an unknown id is a
/// no-op.
#[derive(Error, Debug)]
pub enum CartError {
    /// Item id is empty or whitespace.
    #[error("Item id must not be empty")]
    EmptyId,

    /// Unit price is negative.
    #[error("Invalid price for {id}: {price} is negative")]
    NegativePrice { id: String, price: i64 },

    /// Unit price is above the supported maximum.
    #[error("Price {price} for {id} exceeds maximum allowed ({max})")]
    PriceTooLarge { id: String, price: i64, max: i64 },

    /// Quantity would exceed the per-item maximum.
    #[error("Quantity {requested} for {id} exceeds maximum allowed ({max})")]
    QuantityExceedsLimit { id: String, requested: i64, max: u32 },
}

/// Errors from the scripted checkout flow.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("Cannot check out an empty cart")]
    EmptyCart,
}

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::CartConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Errors restoring persisted cart data.
///
/// These never escape [`crate::CartStore::open`]; the store logs them and
/// starts empty.
#[derive(Error, Debug)]
pub enum RestoreError {
    /// Backend read failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Stored payload is not valid JSON for any known layout.
    #[error("Corrupt cart payload: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Payload was written by a newer version.
    #[error("Unsupported cart payload version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
