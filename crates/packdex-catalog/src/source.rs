//! The seam between the engine and the catalog.

use crate::error::CatalogResult;
use crate::types::CharacterRecord;
use async_trait::async_trait;

/// Source of character records and the total character count.
///
/// Production uses [`crate::CharacterClient`]; tests supply in-memory
/// doubles. Availability and latency are the caller's problem: failures
/// surface as retryable errors, never as data corruption.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetch a single character by catalog id.
    async fn character(&self, id: u64) -> CatalogResult<CharacterRecord>;

    /// Fetch the total number of known characters.
    async fn total_count(&self) -> CatalogResult<u32>;
}
