//! In-memory reference implementation of `CollectionStore`.

use crate::error::{StoreError, StoreResult};
use crate::traits::{CollectionStore, SwapExpectation};
use async_trait::async_trait;
use chrono::Utc;
use packdex_core::{
    Album, AlbumId, Card, CardDraft, CardId, ProposalId, ProposalStatus, TradeProposal, User,
    UserId,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// All tables plus the id counters.
///
/// BTreeMaps keyed by the sequential ids keep iteration in insertion
/// order, which `cards_in_album` and `list_users` rely on.
#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<u64, User>,
    albums: BTreeMap<u64, Album>,
    cards: BTreeMap<u64, Card>,
    proposals: BTreeMap<u64, TradeProposal>,
    next_user: u64,
    next_album: u64,
    next_card: u64,
    next_proposal: u64,
}

impl Tables {
    fn email_taken(&self, email: &str, exclude: Option<UserId>) -> bool {
        self.users.values().any(|u| {
            u.email.eq_ignore_ascii_case(email) && exclude.map_or(true, |id| u.id != id)
        })
    }

    fn album_owned_by(&self, user: UserId) -> Option<Album> {
        self.albums.values().find(|a| a.owner == user).copied()
    }
}

/// In-memory store.
///
/// A single `RwLock` guards the whole table set: every multi-entity write
/// (user+album creation, card batches, trade settlement) runs under one
/// write acquisition and is therefore atomic, and overlapping settles are
/// fully serialized. A durable implementation must provide the same
/// guarantees (row locks or a serializable transaction around the swap).
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn create_user(&self, name: &str, email: &str) -> StoreResult<(User, Album)> {
        let mut t = self.tables.write();
        if t.email_taken(email, None) {
            return Err(StoreError::EmailTaken(email.to_string()));
        }

        t.next_user += 1;
        t.next_album += 1;
        let user = User {
            id: UserId::new(t.next_user),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        let album = Album {
            id: AlbumId::new(t.next_album),
            owner: user.id,
        };

        t.users.insert(user.id.value(), user.clone());
        t.albums.insert(album.id.value(), album);
        debug!(user = %user.id, album = %album.id, "Created user with album");
        Ok((user, album))
    }

    async fn user(&self, id: UserId) -> StoreResult<User> {
        self.tables
            .read()
            .users
            .get(&id.value())
            .cloned()
            .ok_or(StoreError::UserNotFound(id.value()))
    }

    async fn update_user(&self, id: UserId, name: &str, email: &str) -> StoreResult<User> {
        let mut t = self.tables.write();
        if !t.users.contains_key(&id.value()) {
            return Err(StoreError::UserNotFound(id.value()));
        }
        if t.email_taken(email, Some(id)) {
            return Err(StoreError::EmailTaken(email.to_string()));
        }

        let user = t
            .users
            .get_mut(&id.value())
            .ok_or(StoreError::UserNotFound(id.value()))?;
        user.name = name.to_string();
        user.email = email.to_string();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let mut t = self.tables.write();
        if t.users.remove(&id.value()).is_none() {
            return Err(StoreError::UserNotFound(id.value()));
        }

        if let Some(album) = t.album_owned_by(id) {
            t.albums.remove(&album.id.value());
            t.cards.retain(|_, c| c.album != album.id);
        }
        t.proposals
            .retain(|_, p| p.offer_user != id && p.receive_user != id);
        debug!(user = %id, "Deleted user with album, cards and proposals");
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().users.values().cloned().collect())
    }

    async fn album_for_user(&self, user: UserId) -> StoreResult<Album> {
        self.tables
            .read()
            .album_owned_by(user)
            .ok_or(StoreError::NoAlbumForUser(user.value()))
    }

    async fn card(&self, id: CardId) -> StoreResult<Card> {
        self.tables
            .read()
            .cards
            .get(&id.value())
            .cloned()
            .ok_or(StoreError::CardNotFound(id.value()))
    }

    async fn cards_in_album(&self, album: AlbumId) -> StoreResult<Vec<Card>> {
        Ok(self
            .tables
            .read()
            .cards
            .values()
            .filter(|c| c.album == album)
            .cloned()
            .collect())
    }

    async fn insert_cards(&self, album: AlbumId, drafts: Vec<CardDraft>) -> StoreResult<Vec<Card>> {
        let mut t = self.tables.write();
        if !t.albums.contains_key(&album.value()) {
            return Err(StoreError::AlbumNotFound(album.value()));
        }

        let mut persisted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            t.next_card += 1;
            let card = Card {
                id: CardId::new(t.next_card),
                character_id: draft.character_id,
                character_name: draft.character_name,
                rarity: draft.rarity,
                album,
            };
            t.cards.insert(card.id.value(), card.clone());
            persisted.push(card);
        }
        debug!(album = %album, count = persisted.len(), "Inserted card batch");
        Ok(persisted)
    }

    async fn create_proposal(
        &self,
        offer_user: UserId,
        offered_card: CardId,
        receive_user: UserId,
        desired_card: CardId,
    ) -> StoreResult<TradeProposal> {
        let mut t = self.tables.write();
        t.next_proposal += 1;
        let proposal = TradeProposal {
            id: ProposalId::new(t.next_proposal),
            offer_user,
            receive_user,
            offered_card,
            desired_card,
            status: ProposalStatus::Pending,
            created_at: Utc::now(),
        };
        t.proposals.insert(proposal.id.value(), proposal.clone());
        Ok(proposal)
    }

    async fn proposal(&self, id: ProposalId) -> StoreResult<TradeProposal> {
        self.tables
            .read()
            .proposals
            .get(&id.value())
            .cloned()
            .ok_or(StoreError::ProposalNotFound(id.value()))
    }

    async fn delete_proposal(&self, id: ProposalId) -> StoreResult<()> {
        let mut t = self.tables.write();
        t.proposals
            .remove(&id.value())
            .map(|_| ())
            .ok_or(StoreError::ProposalNotFound(id.value()))
    }

    async fn settle_trade(
        &self,
        id: ProposalId,
        expected: SwapExpectation,
    ) -> StoreResult<TradeProposal> {
        let mut t = self.tables.write();

        let proposal = t
            .proposals
            .get(&id.value())
            .cloned()
            .ok_or(StoreError::ProposalNotFound(id.value()))?;
        if proposal.status != ProposalStatus::Pending {
            return Err(StoreError::ProposalNotPending(id.value()));
        }

        let offered = t
            .cards
            .get(&proposal.offered_card.value())
            .cloned()
            .ok_or(StoreError::CardNotFound(proposal.offered_card.value()))?;
        let desired = t
            .cards
            .get(&proposal.desired_card.value())
            .cloned()
            .ok_or(StoreError::CardNotFound(proposal.desired_card.value()))?;

        if offered.album != expected.offer_album {
            return Err(StoreError::OwnershipChanged(format!(
                "offered card {} moved from album {} to {}",
                offered.id, expected.offer_album, offered.album
            )));
        }
        if desired.album != expected.desired_album {
            return Err(StoreError::OwnershipChanged(format!(
                "desired card {} moved from album {} to {}",
                desired.id, expected.desired_album, desired.album
            )));
        }

        // Checks passed; apply the swap and the status flip together.
        if let Some(card) = t.cards.get_mut(&offered.id.value()) {
            card.album = expected.desired_album;
        }
        if let Some(card) = t.cards.get_mut(&desired.id.value()) {
            card.album = expected.offer_album;
        }
        let entry = t
            .proposals
            .get_mut(&id.value())
            .ok_or(StoreError::ProposalNotFound(id.value()))?;
        entry.status = ProposalStatus::Accepted;
        debug!(proposal = %id, "Trade settled");
        Ok(entry.clone())
    }
}
