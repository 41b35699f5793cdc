//! Integration tests for the travel planner.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p travel-planner-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_persistence` - Session store over file storage
//! - `order_persistence` - Order store over file storage
//! - `shared_storage` - Both stores on one storage file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use travel_planner_core::FileStorage;

/// A storage file in a throwaway directory.
///
/// The directory is deleted when the context is dropped.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh, empty context.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("local-storage.json")
    }

    /// Open a new handle on the storage file, as a fresh page load would.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.storage_path())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity record used across tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    pub name: String,
    pub email: String,
}

impl Traveler {
    /// A traveler with a derived email.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }
}
