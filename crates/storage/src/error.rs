//! Typed error enum for the storage layer.
//!
//! Lets callers tell a failed write apart from a rejected record
//! (duplicate, blank input, bad import file) without downcasting.

use std::path::PathBuf;

use quotesync_core::CoreError;
use thiserror::Error;

/// Storage-layer error covering the persistence backends and the record store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure in the file-backed key-value store.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key would escape the store directory or is otherwise unusable.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// In-memory backend lock was poisoned by a panicking writer.
    #[error("backend unavailable: {0}")]
    Backend(String),

    /// Snapshot could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `replace_at` targeted a position past the end of the collection.
    #[error("index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    /// Record rejected by the model (blank input, duplicate, bad import document).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether the error came from the record itself rather than the backend.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_user_facing())
    }
}
