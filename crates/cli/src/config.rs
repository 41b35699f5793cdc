//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TRAVEL_PLANNER_STORAGE_PATH` - Storage file (default: `.travel-planner/local-storage.json`)
//! - `TRAVEL_PLANNER_BASE_URL` - Base path the app is served under (default: `/`)
//! - `TRAVEL_PLANNER_QUOTA_BYTES` - Storage quota in bytes (default: unlimited)

use std::path::PathBuf;

use thiserror::Error;
use travel_planner_core::FileStorage;

const DEFAULT_STORAGE_PATH: &str = ".travel-planner/local-storage.json";
const DEFAULT_BASE_URL: &str = "/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// File backing the key-value storage
    pub storage_path: PathBuf,
    /// Base path for route resolution
    pub base_url: String,
    /// Optional byte quota for the storage file
    pub quota_bytes: Option<usize>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_path =
            PathBuf::from(get_env_or_default("TRAVEL_PLANNER_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let base_url = get_env_or_default("TRAVEL_PLANNER_BASE_URL", DEFAULT_BASE_URL);
        let quota_bytes = parse_quota(get_optional_env("TRAVEL_PLANNER_QUOTA_BYTES"))?;

        Ok(Self {
            storage_path,
            base_url,
            quota_bytes,
        })
    }

    /// Open the configured storage.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        let storage = FileStorage::new(&self.storage_path);
        match self.quota_bytes {
            Some(quota) => storage.with_quota(quota),
            None => storage,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the quota variable. Empty counts as unset.
fn parse_quota(raw: Option<String>) -> Result<Option<usize>, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<usize>().map(Some).map_err(|e| {
            ConfigError::InvalidEnvVar("TRAVEL_PLANNER_QUOTA_BYTES".to_string(), e.to_string())
        }),
    }
}
