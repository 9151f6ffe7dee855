//! Catalog error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connect, timeout, non-2xx other than 404).
    /// Retryable from the caller's point of view.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// The catalog answered but the payload did not parse.
    #[error("Malformed catalog response: {0}")]
    Decode(String),

    /// The catalog has no character with this id.
    #[error("Character not found in catalog: {0}")]
    NotFound(u64),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
