//! Error types shared by the lakehouse crates.

use thiserror::Error;

/// Result type alias for lakehouse common operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while interpreting shared types.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidValue { .. } => 11,
            Error::Json(_) => 61,
        }
    }

    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Error::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}
