//! Store error types.

use thiserror::Error;

/// Errors returned by a product repository.
///
/// Neither variant means "no products"; an empty result is `Ok(vec![])`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or refused the call.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with a document that does not fit the schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::MalformedResponse(e.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
