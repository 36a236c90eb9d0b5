//! Typed error enum for the remote adapter.

use thiserror::Error;

/// Failure to talk to the remote collection.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl RemoteError {
    /// Whether a later attempt could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            Self::JsonParse { .. } | Self::ClientInit(_) => false,
        }
    }
}
