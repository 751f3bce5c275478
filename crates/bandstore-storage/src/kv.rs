//! Typed wrapper with automatic JSON serialization.

use serde::{de::DeserializeOwned, Serialize};

use crate::{Backend, StorageError};

/// Type-safe store over any [`Backend`].
///
/// Values are encoded as JSON for any type that implements `Serialize` and
/// `DeserializeOwned`.
#[derive(Debug, Clone, Default)]
pub struct Store<B> {
    backend: B,
}

impl<B: Backend> Store<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<LineItem>> = store.get("sm_cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get the raw string stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.backend.get(key)
    }

    /// Set a value in the store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("sm_cart", &payload)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Delete a value from the store.
    pub fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.backend.keys()
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Unwrap the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_typed_round_trip() {
        let mut store = Store::new(MemoryBackend::new());
        let entries = vec![Entry {
            id: "p1".into(),
            quantity: 2,
        }];

        store.set("cart", &entries).unwrap();
        let loaded: Option<Vec<Entry>> = store.get("cart").unwrap();
        assert_eq!(loaded, Some(entries));
        assert_eq!(
            store.get_raw("cart").unwrap().as_deref(),
            Some(r#"[{"id":"p1","quantity":2}]"#)
        );
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let mut backend = MemoryBackend::new();
        backend.set("cart", "{not json").unwrap();
        let store = Store::new(backend);

        let result: Result<Option<Vec<Entry>>, _> = store.get("cart");
        assert!(matches!(result, Err(StorageError::SerializeError(_))));
    }

    #[test]
    fn test_delete_and_exists() {
        let mut store = Store::new(MemoryBackend::new());
        store.set("k", &1).unwrap();
        assert!(store.exists("k").unwrap());

        store.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
        assert!(store.keys().unwrap().is_empty());
    }
}
