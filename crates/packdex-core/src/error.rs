//! Error taxonomy for domain operations.
//!
//! Every domain operation fails with one of these kinds so the boundary
//! layer can map them deterministically (NotFound -> 404,
//! Conflict/InvalidState -> 409, InvalidArgument -> 400, Forbidden -> 403,
//! Unavailable -> 503).

use thiserror::Error;

/// Domain error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An ownership or uniqueness check failed, at validation or
    /// re-validation time.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The acting user is not authorized for the requested transition.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Dependent external data is not ready yet. Retryable.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The request is malformed or self-contradictory.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The entity is not in a state that permits the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DomainError {
    /// Stable machine-readable kind, used by the boundary layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Forbidden(_) => "forbidden",
            Self::Unavailable(_) => "unavailable",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::InvalidState(_) => "invalid_state",
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
