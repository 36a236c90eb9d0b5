use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by the quote model, import codec and local add path.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate quote: \"{text}\" ({category}) already exists")]
    Duplicate { text: String, category: String },

    /// The import document is not a JSON array of quote objects.
    #[error("Invalid import file: {0}")]
    ImportFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Whether this error should be shown to the user verbatim.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Duplicate { .. } | Self::ImportFormat(_))
    }
}

pub type Result<T> = StdResult<T, CoreError>;
