//! File-backed storage.
//!
//! The whole store is one JSON object mapping keys to their string values,
//! so the file reads the same way local storage does:
//!
//! ```json
//! {
//!   "currentUser": "{\"name\":\"Ada\"}",
//!   "orders": "[]"
//! }
//! ```
//!
//! Every operation reads the file fresh. Writes go to a uniquely named
//! sibling temp file which is then renamed over the original, so concurrent
//! writers never share a temp file. Two processes writing the same file are
//! last-write-wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;

use super::{Storage, StorageError};

/// Storage persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    /// Open storage at `path`. The file is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: None,
        }
    }

    /// Limit total key and value bytes to `quota`.
    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let mut tmp = Builder::new()
            .prefix(".local-storage-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::trace!(path = %self.path.display(), keys = items.len(), "Storage file written");
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        items.insert(key.to_owned(), value.to_owned());

        if let Some(quota) = self.quota {
            let used: usize = items.iter().map(|(k, v)| k.len() + v.len()).sum();
            if used > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    quota,
                });
            }
        }

        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
