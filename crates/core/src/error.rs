//! Store error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by store mutations.
///
/// Reads never produce these: unreadable or malformed persisted state is
/// treated as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend rejected the write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
