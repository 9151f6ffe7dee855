//! The trade-proposal lifecycle.

use chrono::{DateTime, Utc};
use packdex_core::{
    CardId, DomainError, DomainResult, ProposalId, ProposalStatus, Rarity, TradeProposal, UserId,
};
use packdex_store::{CollectionStore, SwapExpectation};
use std::sync::Arc;
use tracing::info;

/// One side of a trade, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeParty {
    pub id: UserId,
    pub name: String,
}

/// A card as it appears in a trade detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeCard {
    pub id: CardId,
    pub character_name: String,
    pub rarity: Rarity,
}

/// Fully-resolved proposal view, denormalized eagerly at call time so it
/// never fails due to later changes in the referenced entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDetail {
    pub id: ProposalId,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub offering: TradeParty,
    pub receiving: TradeParty,
    pub offered: TradeCard,
    pub desired: TradeCard,
}

/// The proposal state machine: propose, accept, delete, detail.
pub struct TradeEngine {
    store: Arc<dyn CollectionStore>,
}

impl TradeEngine {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Create a Pending proposal after validating every referenced entity
    /// and both ownership edges. No proposal row exists on any failure.
    ///
    /// # Errors
    /// - `InvalidArgument` on a self-trade (offerer == receiver)
    /// - `NotFound` if either user or either card is missing
    /// - `Conflict` if a card is not in its supposed owner's album
    pub async fn propose(
        &self,
        offer_user: UserId,
        offered_card: CardId,
        receive_user: UserId,
        desired_card: CardId,
    ) -> DomainResult<TradeProposal> {
        if offer_user == receive_user {
            return Err(DomainError::InvalidArgument(
                "a trade needs two distinct users".to_string(),
            ));
        }

        self.store.user(offer_user).await?;
        self.store.user(receive_user).await?;
        let offered = self.store.card(offered_card).await?;
        let desired = self.store.card(desired_card).await?;
        let offer_album = self.store.album_for_user(offer_user).await?;
        let receive_album = self.store.album_for_user(receive_user).await?;

        if offered.album != offer_album.id {
            return Err(DomainError::Conflict(format!(
                "offered card {offered_card} does not belong to user {offer_user}"
            )));
        }
        if desired.album != receive_album.id {
            return Err(DomainError::Conflict(format!(
                "desired card {desired_card} does not belong to user {receive_user}"
            )));
        }

        let proposal = self
            .store
            .create_proposal(offer_user, offered_card, receive_user, desired_card)
            .await?;
        info!(proposal = %proposal.id, offer_user = %offer_user, receive_user = %receive_user, "Trade proposed");
        Ok(proposal)
    }

    /// Accept a pending proposal as its receiver.
    ///
    /// Ownership is re-validated at accept time inside the store's settle
    /// unit of work: a card already traded away in a concurrently
    /// accepted proposal fails the settle with `Conflict` and the
    /// proposal stays Pending (retry or delete it).
    ///
    /// # Errors
    /// - `NotFound` if the proposal is missing
    /// - `Forbidden` if the acting user is not the receiver
    /// - `InvalidState` if the proposal is no longer Pending
    /// - `Conflict` if either card moved since the proposal was created
    pub async fn accept(
        &self,
        id: ProposalId,
        acting_user: UserId,
    ) -> DomainResult<TradeProposal> {
        let proposal = self.store.proposal(id).await?;

        if proposal.receive_user != acting_user {
            return Err(DomainError::Forbidden(format!(
                "user {acting_user} is not the receiver of proposal {id}"
            )));
        }
        if !proposal.is_pending() {
            return Err(DomainError::InvalidState(format!(
                "proposal {id} is {}",
                proposal.status
            )));
        }

        let offer_album = self.store.album_for_user(proposal.offer_user).await?;
        let receive_album = self.store.album_for_user(proposal.receive_user).await?;

        let settled = self
            .store
            .settle_trade(
                id,
                SwapExpectation {
                    offer_album: offer_album.id,
                    desired_album: receive_album.id,
                },
            )
            .await?;
        info!(proposal = %id, "Trade accepted, cards swapped");
        Ok(settled)
    }

    /// Withdraw a pending proposal.
    ///
    /// Accepted proposals are trade history and cannot be deleted.
    ///
    /// # Errors
    /// - `NotFound` if the proposal is missing (including a second delete
    ///   of the same id)
    /// - `InvalidState` if the proposal is Accepted
    pub async fn delete(&self, id: ProposalId) -> DomainResult<()> {
        let proposal = self.store.proposal(id).await?;
        if proposal.status == ProposalStatus::Accepted {
            return Err(DomainError::InvalidState(format!(
                "proposal {id} is accepted trade history and cannot be deleted"
            )));
        }

        self.store.delete_proposal(id).await?;
        info!(proposal = %id, "Trade proposal deleted");
        Ok(())
    }

    /// Fully-resolved detail view of a proposal.
    pub async fn detail(&self, id: ProposalId) -> DomainResult<TradeDetail> {
        let proposal = self.store.proposal(id).await?;
        let offering = self.store.user(proposal.offer_user).await?;
        let receiving = self.store.user(proposal.receive_user).await?;
        let offered = self.store.card(proposal.offered_card).await?;
        let desired = self.store.card(proposal.desired_card).await?;

        Ok(TradeDetail {
            id: proposal.id,
            status: proposal.status,
            created_at: proposal.created_at,
            offering: TradeParty {
                id: offering.id,
                name: offering.name,
            },
            receiving: TradeParty {
                id: receiving.id,
                name: receiving.name,
            },
            offered: TradeCard {
                id: offered.id,
                character_name: offered.character_name,
                rarity: offered.rarity,
            },
            desired: TradeCard {
                id: desired.id,
                character_name: desired.character_name,
                rarity: desired.rarity,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packdex_core::{Album, Card, CardDraft, User};
    use packdex_store::MemoryStore;

    async fn seeded_user(
        store: &Arc<MemoryStore>,
        name: &str,
        email: &str,
        character: (u64, &str, Rarity),
    ) -> (User, Album, Card) {
        let (user, album) = store.create_user(name, email).await.unwrap();
        let cards = store
            .insert_cards(
                album.id,
                vec![CardDraft {
                    character_id: character.0,
                    character_name: character.1.to_string(),
                    rarity: character.2,
                }],
            )
            .await
            .unwrap();
        (user, album, cards.into_iter().next().unwrap())
    }

    async fn two_party_setup() -> (
        Arc<MemoryStore>,
        TradeEngine,
        (User, Album, Card),
        (User, Album, Card),
    ) {
        let store = Arc::new(MemoryStore::new());
        let engine = TradeEngine::new(store.clone());
        let ana = seeded_user(
            &store,
            "Ana",
            "ana@example.com",
            (1, "Rick Sanchez", Rarity::Common),
        )
        .await;
        let bob = seeded_user(
            &store,
            "Bob",
            "bob@example.com",
            (2, "Morty Smith", Rarity::Rare),
        )
        .await;
        (store, engine, ana, bob)
    }

    #[tokio::test]
    async fn test_propose_creates_pending_proposal() {
        let (_, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;

        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();

        assert_eq!(proposal.status, ProposalStatus::Pending);
        assert_eq!(proposal.offer_user, ana.id);
        assert_eq!(proposal.receive_user, bob.id);
    }

    #[tokio::test]
    async fn test_propose_rejects_self_trade() {
        let (_, engine, (ana, _, ana_card), (_, _, bob_card)) = two_party_setup().await;

        let err = engine
            .propose(ana.id, ana_card.id, ana.id, bob_card.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[tokio::test]
    async fn test_propose_foreign_card_is_conflict_and_persists_nothing() {
        let (store, engine, (ana, _, _), (bob, _, bob_card)) = two_party_setup().await;

        // Ana offers Bob's card.
        let err = engine
            .propose(ana.id, bob_card.id, bob.id, bob_card.id)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "conflict");
        // No proposal row was created.
        assert!(matches!(
            store.proposal(ProposalId::new(1)).await,
            Err(packdex_store::StoreError::ProposalNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_propose_missing_entities_are_not_found() {
        let (_, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;

        let err = engine
            .propose(UserId::new(99), ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");

        let err = engine
            .propose(ana.id, CardId::new(99), bob.id, bob_card.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_accept_swaps_albums_and_marks_accepted() {
        let (store, engine, (ana, ana_album, ana_card), (bob, bob_album, bob_card)) =
            two_party_setup().await;
        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();

        let settled = engine.accept(proposal.id, bob.id).await.unwrap();

        assert_eq!(settled.status, ProposalStatus::Accepted);
        assert_eq!(store.card(ana_card.id).await.unwrap().album, bob_album.id);
        assert_eq!(store.card(bob_card.id).await.unwrap().album, ana_album.id);
    }

    #[tokio::test]
    async fn test_accept_by_non_receiver_is_forbidden_and_stays_pending() {
        let (store, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();

        // The offerer cannot accept their own proposal.
        let err = engine.accept(proposal.id, ana.id).await.unwrap_err();

        assert_eq!(err.kind(), "forbidden");
        assert_eq!(
            store.proposal(proposal.id).await.unwrap().status,
            ProposalStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_accept_twice_is_invalid_state() {
        let (_, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();

        engine.accept(proposal.id, bob.id).await.unwrap();
        let err = engine.accept(proposal.id, bob.id).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_state");
    }

    #[tokio::test]
    async fn test_stale_proposal_accept_is_conflict_and_stays_pending() {
        let (store, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let carol = seeded_user(
            &store,
            "Carol",
            "carol@example.com",
            (3, "Summer Smith", Rarity::Special),
        )
        .await;

        // Ana offers the same card to Bob and Carol; Bob accepts first.
        let to_bob = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();
        let to_carol = engine
            .propose(ana.id, ana_card.id, carol.0.id, carol.2.id)
            .await
            .unwrap();
        engine.accept(to_bob.id, bob.id).await.unwrap();

        let err = engine.accept(to_carol.id, carol.0.id).await.unwrap_err();

        assert_eq!(err.kind(), "conflict");
        assert_eq!(
            store.proposal(to_carol.id).await.unwrap().status,
            ProposalStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_concurrent_accepts_settle_exactly_one() {
        let (store, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let carol = seeded_user(
            &store,
            "Carol",
            "carol@example.com",
            (3, "Summer Smith", Rarity::Special),
        )
        .await;

        let to_bob = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();
        let to_carol = engine
            .propose(ana.id, ana_card.id, carol.0.id, carol.2.id)
            .await
            .unwrap();

        let engine = Arc::new(engine);
        let (e1, e2) = (engine.clone(), engine.clone());
        let bob_id = bob.id;
        let carol_id = carol.0.id;
        let a = tokio::spawn(async move { e1.accept(to_bob.id, bob_id).await });
        let b = tokio::spawn(async move { e2.accept(to_carol.id, carol_id).await });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);

        // The shared card ended up in exactly one of the two albums.
        let final_album = store.card(ana_card.id).await.unwrap().album;
        assert_ne!(
            final_album,
            store.album_for_user(ana.id).await.unwrap().id
        );
    }

    #[tokio::test]
    async fn test_delete_pending_then_again_is_not_found() {
        let (_, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();

        engine.delete(proposal.id).await.unwrap();
        let err = engine.delete(proposal.id).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_delete_accepted_is_invalid_state() {
        let (_, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();
        engine.accept(proposal.id, bob.id).await.unwrap();

        let err = engine.delete(proposal.id).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_state");
    }

    #[tokio::test]
    async fn test_detail_resolves_names_and_rarities() {
        let (_, engine, (ana, _, ana_card), (bob, _, bob_card)) = two_party_setup().await;
        let proposal = engine
            .propose(ana.id, ana_card.id, bob.id, bob_card.id)
            .await
            .unwrap();

        let detail = engine.detail(proposal.id).await.unwrap();

        assert_eq!(detail.offering.name, "Ana");
        assert_eq!(detail.receiving.name, "Bob");
        assert_eq!(detail.offered.character_name, "Rick Sanchez");
        assert_eq!(detail.offered.rarity, Rarity::Common);
        assert_eq!(detail.desired.character_name, "Morty Smith");
        assert_eq!(detail.desired.rarity, Rarity::Rare);
        assert_eq!(detail.status, ProposalStatus::Pending);
    }

    #[tokio::test]
    async fn test_detail_missing_proposal_is_not_found() {
        let (_, engine, _, _) = two_party_setup().await;
        let err = engine.detail(ProposalId::new(42)).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }
}
