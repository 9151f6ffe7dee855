//! Store error types.

use packdex_core::DomainError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("Album not found: {0}")]
    AlbumNotFound(u64),

    #[error("No album for user: {0}")]
    NoAlbumForUser(u64),

    #[error("Card not found: {0}")]
    CardNotFound(u64),

    #[error("Trade proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Card ownership changed since proposal: {0}")]
    OwnershipChanged(String),

    #[error("Trade proposal is not pending: {0}")]
    ProposalNotPending(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// How store failures rank in the domain taxonomy.
impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(_)
            | StoreError::AlbumNotFound(_)
            | StoreError::NoAlbumForUser(_)
            | StoreError::CardNotFound(_)
            | StoreError::ProposalNotFound(_) => DomainError::NotFound(err.to_string()),
            StoreError::EmailTaken(_) | StoreError::OwnershipChanged(_) => {
                DomainError::Conflict(err.to_string())
            }
            StoreError::ProposalNotPending(_) => DomainError::InvalidState(err.to_string()),
        }
    }
}
