//! Census cache: the total character count as explicit state.
//!
//! Pack opening and progress math both need the catalog's total count.
//! Rather than an ambient global loaded once at startup, the count lives
//! here with a defined "not yet loaded" value and a controlled refresh
//! path. Zero doubles as the sentinel: the catalog is never empty, so a
//! stored 0 means "unknown" and `total()` reports `None`.

use crate::error::CatalogResult;
use crate::source::CharacterSource;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{info, warn};

/// Fallback total installed when the catalog is unreachable at startup.
pub const FALLBACK_TOTAL: u32 = 826;

/// Shared cache of the catalog's total character count.
#[derive(Debug, Default)]
pub struct CensusCache {
    total: AtomicU32,
}

impl CensusCache {
    /// Create an unloaded cache.
    pub fn new() -> Self {
        Self {
            total: AtomicU32::new(0),
        }
    }

    /// Create a cache with a known total. Mostly useful in tests.
    pub fn with_total(total: u32) -> Self {
        Self {
            total: AtomicU32::new(total),
        }
    }

    /// Current total, or `None` if not loaded yet.
    pub fn total(&self) -> Option<u32> {
        match self.total.load(Ordering::Acquire) {
            0 => None,
            n => Some(n),
        }
    }

    /// Overwrite the cached total.
    pub fn set(&self, total: u32) {
        self.total.store(total, Ordering::Release);
    }

    /// Re-fetch the total from the catalog and cache it.
    ///
    /// On failure the previously cached value (if any) is kept.
    pub async fn refresh(&self, source: &dyn CharacterSource) -> CatalogResult<u32> {
        let total = source.total_count().await?;
        self.set(total);
        Ok(total)
    }

    /// Startup path: fetch the total, falling back to [`FALLBACK_TOTAL`]
    /// with a logged warning if the catalog is unreachable. Never blocks
    /// startup on catalog availability.
    pub async fn prime(&self, source: &dyn CharacterSource) -> u32 {
        match self.refresh(source).await {
            Ok(total) => {
                info!(total, "Character census primed from catalog");
                total
            }
            Err(e) => {
                warn!(error = %e, fallback = FALLBACK_TOTAL, "Census fetch failed, using fallback total");
                self.set(FALLBACK_TOTAL);
                FALLBACK_TOTAL
            }
        }
    }
}
