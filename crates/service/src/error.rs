//! Typed error enum for the service layer.
//!
//! Unifies storage and remote failures so the orchestrator can log and report
//! them without caring which layer raised them.

use quotesync_remote::RemoteError;
use quotesync_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage and remote failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Persisting or reading the local collection failed, or a record was rejected.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Fetching from or pushing to the remote source failed.
    #[error("remote: {0}")]
    Remote(#[from] RemoteError),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying on the next tick).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Remote(e) => e.is_transient(),
            Self::Storage(_) => false,
        }
    }
}
