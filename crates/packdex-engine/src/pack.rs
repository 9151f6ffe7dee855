//! Pack opening.

use crate::draw::DrawSource;
use packdex_catalog::{CatalogError, CensusCache, CharacterSource};
use packdex_core::{Card, CardDraft, DomainError, DomainResult, Rarity, UserId};
use packdex_store::CollectionStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Cards per pack.
pub const PACK_SIZE: usize = 5;

/// Draws a fixed-size batch of cards into a user's album.
pub struct PackOpener {
    store: Arc<dyn CollectionStore>,
    catalog: Arc<dyn CharacterSource>,
    census: Arc<CensusCache>,
}

impl PackOpener {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        catalog: Arc<dyn CharacterSource>,
        census: Arc<CensusCache>,
    ) -> Self {
        Self {
            store,
            catalog,
            census,
        }
    }

    /// Open a pack for a user.
    ///
    /// Five independent draws: character id uniform in `[1, total]`,
    /// catalog lookup, status-keyed rarity roll. Duplicate character ids
    /// within one pack are intentional; they feed the duplicate report.
    ///
    /// The five cards are persisted as one all-or-nothing batch: a
    /// catalog failure mid-pack aborts the whole operation and no card
    /// from the batch is ever observable.
    ///
    /// # Errors
    /// - `Unavailable` if the census is not loaded yet or the catalog
    ///   fails mid-pack (both retryable)
    /// - `NotFound` if the user has no album
    pub async fn open_pack(
        &self,
        user: UserId,
        draws: &mut dyn DrawSource,
    ) -> DomainResult<Vec<Card>> {
        let total = self.census.total().ok_or_else(|| {
            DomainError::Unavailable(
                "character census not loaded yet, retry in a moment".to_string(),
            )
        })?;
        let album = self.store.album_for_user(user).await?;

        let mut drafts = Vec::with_capacity(PACK_SIZE);
        for _ in 0..PACK_SIZE {
            let character_id = draws.character_roll(total);
            let record = self
                .catalog
                .character(character_id)
                .await
                .map_err(catalog_unavailable)?;
            let rarity = Rarity::assign(record.status, draws.rarity_roll());
            debug!(character_id, name = %record.name, ?rarity, "Drew card");
            drafts.push(CardDraft {
                character_id: record.id,
                character_name: record.name,
                rarity,
            });
        }

        let cards = self.store.insert_cards(album.id, drafts).await?;
        info!(user = %user, album = %album.id, count = cards.len(), "Opened pack");
        Ok(cards)
    }
}

/// Catalog failures during a pack are retryable from the caller's point
/// of view: the pack was not committed, nothing was corrupted. This
/// includes a missing id inside `[1, total]` (census and per-id endpoint
/// momentarily disagree).
fn catalog_unavailable(err: CatalogError) -> DomainError {
    DomainError::Unavailable(err.to_string())
}
