//! Keyed string storage for the bandstore cart.
//!
//! A [`Backend`] stores raw strings under keys, the way browser local storage
//! does. [`Store`] wraps a backend with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use bandstore_storage::{MemoryBackend, Store};
//!
//! let mut store = Store::new(MemoryBackend::new());
//! store.set("cart:guest", &vec![1, 2, 3]).unwrap();
//!
//! let items: Option<Vec<u32>> = store.get("cart:guest").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod backend;
mod error;
mod file;
mod kv;

pub use backend::{Backend, MemoryBackend};
pub use error::StorageError;
pub use file::FileBackend;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, FileBackend, MemoryBackend, StorageError, Store};
}
