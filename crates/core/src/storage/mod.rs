//! Key-value storage backing the stores.
//!
//! The stores never touch a concrete backend. They are handed something that
//! implements [`Storage`]: a synchronous, string-valued key-value map with the
//! same shape as a browser's local storage.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, optionally with a byte quota
//! - `FileStorage` - JSON file on disk (requires the `file-storage` feature)
//!
//! Methods take `&self` because local storage is a shared, process-wide
//! handle. One backend can serve both stores through `&S` or `Rc<S>`.

#[cfg(feature = "file-storage")]
mod file;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[cfg(feature = "file-storage")]
pub use file::FileStorage;

/// Storage keys owned by the stores.
pub mod keys {
    /// Key for the serialized identity of the logged-in user.
    pub const CURRENT_USER: &str = "currentUser";

    /// Key for the serialized order collection.
    pub const ORDERS: &str = "orders";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the backend's quota.
    #[error("storage quota of {quota} bytes exceeded while writing '{key}'")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Configured quota in bytes.
        quota: usize,
    },

    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend's own data could not be read.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),
}

/// Synchronous, string-valued key-value storage.
pub trait Storage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::QuotaExceeded` if the backend is full, or
    /// another `StorageError` if the write fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory storage.
///
/// Usage is measured as the byte length of every key plus its value. With a
/// quota set, a write that would push usage past it fails with
/// [`StorageError::QuotaExceeded`] and leaves the map untouched.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage limited to `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: RefCell::default(),
            quota: Some(quota),
        }
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let replaced = self
                .items
                .borrow()
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let projected = self.used_bytes() - replaced + key.len() + value.len();
            if projected > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    quota,
                });
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("a").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("nope").is_ok());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let err = storage.set_item("other", "123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 10, .. }));

        // Failed write leaves existing data alone
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("12345"));
        assert_eq!(storage.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "12345").unwrap();
        // Replacing in place stays within quota
        storage.set_item("k", "54321").unwrap();
        assert_eq!(storage.used_bytes(), 6);
    }

    #[test]
    fn test_shared_through_rc() {
        let storage = Rc::new(MemoryStorage::new());
        let handle = Rc::clone(&storage);

        handle.set_item("shared", "yes").unwrap();
        assert_eq!(storage.get_item("shared").unwrap().as_deref(), Some("yes"));
    }
}
