//! The `CollectionStore` trait.

use crate::error::StoreResult;
use async_trait::async_trait;
use packdex_core::{
    Album, AlbumId, Card, CardDraft, CardId, ProposalId, TradeProposal, User, UserId,
};

/// Expected card placement at settle time.
///
/// `settle_trade` re-checks these under its unit of work; a mismatch
/// means ownership changed since the proposal was created and the settle
/// must fail without touching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapExpectation {
    /// Album the offered card must still be in (the offerer's).
    pub offer_album: AlbumId,
    /// Album the desired card must still be in (the receiver's).
    pub desired_album: AlbumId,
}

/// Durable storage for users, albums, cards and trade proposals.
///
/// Contract highlights:
/// - `create_user` persists the user and their album as one atomic write.
/// - `delete_user` cascades to the album, its cards, and any proposal
///   referencing the user.
/// - `insert_cards` is all-or-nothing: either every draft becomes a
///   persisted card appended to the album, or none does.
/// - `settle_trade` is the single cross-aggregate mutation in the system
///   and must serialize against other settles touching the same cards.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    // --- users ---

    /// Create a user together with their (empty) album.
    async fn create_user(&self, name: &str, email: &str) -> StoreResult<(User, Album)>;

    async fn user(&self, id: UserId) -> StoreResult<User>;

    /// Update name and email. Email uniqueness is enforced here.
    async fn update_user(&self, id: UserId, name: &str, email: &str) -> StoreResult<User>;

    /// Delete a user, cascading to album, cards and proposals.
    async fn delete_user(&self, id: UserId) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    // --- albums & cards ---

    async fn album_for_user(&self, user: UserId) -> StoreResult<Album>;

    async fn card(&self, id: CardId) -> StoreResult<Card>;

    /// Cards currently assigned to an album, in insertion order.
    async fn cards_in_album(&self, album: AlbumId) -> StoreResult<Vec<Card>>;

    /// Persist a batch of new cards into an album, all-or-nothing.
    /// Returns the persisted cards in draft order.
    async fn insert_cards(&self, album: AlbumId, drafts: Vec<CardDraft>) -> StoreResult<Vec<Card>>;

    // --- trade proposals ---

    /// Persist a new Pending proposal. Validation is the engine's job.
    async fn create_proposal(
        &self,
        offer_user: UserId,
        offered_card: CardId,
        receive_user: UserId,
        desired_card: CardId,
    ) -> StoreResult<TradeProposal>;

    async fn proposal(&self, id: ProposalId) -> StoreResult<TradeProposal>;

    /// Remove a proposal record. Missing id is an error (no silent
    /// double-delete).
    async fn delete_proposal(&self, id: ProposalId) -> StoreResult<()>;

    /// Settle a pending trade: under one unit of work, re-check that the
    /// proposal is still Pending and that both cards sit in their expected
    /// albums, then exchange the two cards' album assignments and mark the
    /// proposal Accepted. Any failed check leaves every record untouched.
    async fn settle_trade(
        &self,
        id: ProposalId,
        expected: SwapExpectation,
    ) -> StoreResult<TradeProposal>;
}
