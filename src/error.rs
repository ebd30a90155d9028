//! Error types for Storelens

use thiserror::Error;

/// Result type alias for Storelens operations
pub type Result<T> = std::result::Result<T, StorelensError>;

/// Main error type for Storelens
#[derive(Error, Debug)]
pub enum StorelensError {
    /// A provider record is missing its required identity field. Fabricating
    /// an id would corrupt downstream joins, so the record is rejected
    /// instead of patched.
    #[error("malformed {kind} record at index {index}: missing required field `{field}`")]
    MalformedRecord {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorelensError {
    /// Check whether this error rejects a single record rather than the
    /// whole collection.
    pub fn is_record_level(&self) -> bool {
        matches!(self, StorelensError::MalformedRecord { .. })
    }
}
