//! Raw string backends.

use std::collections::BTreeMap;

use crate::StorageError;

/// A keyed string store.
///
/// Backends store raw strings only. Encoding is handled by [`crate::Store`].
pub trait Backend {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;

    /// List all stored keys.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }
}

/// In-memory backend with browser-storage failure modes.
///
/// An optional byte quota covers keys plus values, like local storage's
/// per-origin limit. A disabled backend rejects every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryBackend {
    /// Create an empty, unlimited backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend limited to `bytes` of keys and values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Enable or disable the backend.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Change the quota. `None` removes the limit.
    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Disabled);
        }
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;

        if let Some(limit) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut backend = MemoryBackend::new();
        backend.set("a", "1").unwrap();
        assert_eq!(backend.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.get("missing").unwrap(), None);
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let mut backend = MemoryBackend::new();
        assert!(backend.delete("nothing").is_ok());
    }

    #[test]
    fn test_quota_exceeded() {
        let mut backend = MemoryBackend::with_quota(10);
        backend.set("k", "12345").unwrap();

        let err = backend.set("k2", "123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(backend.get("k2").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value() {
        let mut backend = MemoryBackend::with_quota(10);
        backend.set("k", "123456789").unwrap();
        // Overwriting frees the old value first.
        backend.set("k", "987654321").unwrap();
        assert_eq!(backend.used_bytes(), 10);
    }

    #[test]
    fn test_disabled_rejects_everything() {
        let mut backend = MemoryBackend::new();
        backend.set("k", "v").unwrap();
        backend.set_disabled(true);

        assert!(matches!(backend.get("k"), Err(StorageError::Disabled)));
        assert!(matches!(backend.set("k", "v"), Err(StorageError::Disabled)));
        assert!(matches!(backend.keys(), Err(StorageError::Disabled)));

        backend.set_disabled(false);
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_boxed_backend() {
        let mut backend: Box<dyn Backend> = Box::new(MemoryBackend::new());
        backend.set("k", "v").unwrap();
        assert!(backend.exists("k").unwrap());
        assert_eq!(backend.keys().unwrap(), vec!["k".to_string()]);
    }
}
