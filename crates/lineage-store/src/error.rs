//! Store error types

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store-specific error types.
///
/// These cover whole-document failures only. A malformed row inside an
/// otherwise readable snapshot is not an error; the loader skips it and
/// counts it in the [`LoadReport`](crate::snapshot::LoadReport).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
