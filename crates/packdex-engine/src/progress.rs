//! Collection progress and duplicate accounting.

use packdex_catalog::CensusCache;
use packdex_core::{AlbumId, Card, DomainResult, Rarity, UserId};
use packdex_store::CollectionStore;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Grouping key for the duplicate report: a card line, not a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    pub character_name: String,
    pub rarity: Rarity,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.character_name, self.rarity)
    }
}

/// Everything the album page shows: the raw card list, the completion
/// percentage, and the duplicate counts.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumOverview {
    pub album_id: AlbumId,
    pub cards: Vec<Card>,
    pub completion: f64,
    pub duplicates: HashMap<DuplicateKey, u32>,
}

/// Derives completion and duplicate figures from an album's card set.
pub struct ProgressCalculator {
    store: Arc<dyn CollectionStore>,
    census: Arc<CensusCache>,
}

impl ProgressCalculator {
    pub fn new(store: Arc<dyn CollectionStore>, census: Arc<CensusCache>) -> Self {
        Self { store, census }
    }

    /// Completion percentage in `[0, 100]`, rounded half-up to two
    /// decimal places: distinct character ids over the census total.
    ///
    /// An unloaded census yields `0.0` — a defined fallback, not an
    /// error. A missing album is `NotFound`.
    pub async fn completion(&self, user: UserId) -> DomainResult<f64> {
        let album = self.store.album_for_user(user).await?;
        let Some(total) = self.census.total() else {
            return Ok(0.0);
        };

        let cards = self.store.cards_in_album(album.id).await?;
        let distinct: HashSet<u64> = cards.iter().map(|c| c.character_id).collect();

        let raw = (distinct.len() as f64 / f64::from(total)) * 100.0;
        // f64::round is half-away-from-zero, which equals half-up for the
        // non-negative values possible here.
        Ok((raw * 100.0).round() / 100.0)
    }

    /// Extra copies per (character name, rarity) line.
    ///
    /// A line with n > 1 cards contributes n - 1; lines with a single
    /// card are omitted entirely, so the report never contains a zero and
    /// never counts the first copy.
    pub async fn duplicate_report(
        &self,
        user: UserId,
    ) -> DomainResult<HashMap<DuplicateKey, u32>> {
        let album = self.store.album_for_user(user).await?;
        let cards = self.store.cards_in_album(album.id).await?;
        Ok(count_duplicates(&cards))
    }

    /// The album page view: cards, completion, duplicates in one call.
    pub async fn album_overview(&self, user: UserId) -> DomainResult<AlbumOverview> {
        let album = self.store.album_for_user(user).await?;
        let cards = self.store.cards_in_album(album.id).await?;
        let completion = self.completion(user).await?;
        let duplicates = count_duplicates(&cards);

        Ok(AlbumOverview {
            album_id: album.id,
            cards,
            completion,
            duplicates,
        })
    }
}

fn count_duplicates(cards: &[Card]) -> HashMap<DuplicateKey, u32> {
    let mut sizes: HashMap<DuplicateKey, u32> = HashMap::new();
    for card in cards {
        let key = DuplicateKey {
            character_name: card.character_name.clone(),
            rarity: card.rarity,
        };
        *sizes.entry(key).or_insert(0) += 1;
    }

    sizes.retain(|_, n| *n > 1);
    for n in sizes.values_mut() {
        *n -= 1;
    }
    sizes
}
