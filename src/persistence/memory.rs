use crate::persistence::{Storage, StorageError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    values: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

/// In-memory [`Storage`] shared between clones.
///
/// Clones see the same values, so a test can keep one handle to inspect what the
/// store wrote through another. [`MemoryStorage::set_failing`] makes every call
/// fail, for exercising the "storage is down" path.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage with `key` already holding `value`.
    pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.inner.values.lock().insert(key.into(), value.into());
        storage
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the raw stored value, bypassing the failure switch.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.values.lock().get(key).cloned()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory storage switched off".to_string()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.inner.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner
            .values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.write("k", "v").unwrap();
        assert_eq!(other.read("k").unwrap().as_deref(), Some("v"));

        other.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn test_failing_mode_rejects_calls() {
        let storage = MemoryStorage::seeded("k", "v");
        storage.set_failing(true);

        assert!(matches!(storage.read("k"), Err(StorageError::Unavailable(_))));
        assert!(storage.write("k", "w").is_err());
        assert_eq!(storage.raw("k").as_deref(), Some("v"));
    }
}
