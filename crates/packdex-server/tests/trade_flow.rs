//! End-to-end flow across the wired services: register two collectors,
//! open packs, check progress, and trade a card with full ownership
//! verification.

use async_trait::async_trait;
use packdex_catalog::{CatalogResult, CensusCache, CharacterRecord, CharacterSource};
use packdex_core::{ProposalStatus, VitalStatus};
use packdex_engine::{
    PackOpener, PackRng, ProgressCalculator, TradeEngine, UserService, PACK_SIZE,
};
use packdex_store::{CollectionStore, MemoryStore};
use std::sync::Arc;

/// Catalog double covering the full census range.
struct StubCatalog;

#[async_trait]
impl CharacterSource for StubCatalog {
    async fn character(&self, id: u64) -> CatalogResult<CharacterRecord> {
        let status = match id % 3 {
            0 => VitalStatus::Other,
            1 => VitalStatus::Alive,
            _ => VitalStatus::Dead,
        };
        Ok(CharacterRecord {
            id,
            name: format!("Character {id}"),
            status,
        })
    }

    async fn total_count(&self) -> CatalogResult<u32> {
        Ok(826)
    }
}

struct Services {
    store: Arc<MemoryStore>,
    users: UserService,
    packs: PackOpener,
    progress: ProgressCalculator,
    trades: TradeEngine,
}

fn wire() -> Services {
    let store = Arc::new(MemoryStore::new());
    let catalog = Arc::new(StubCatalog);
    let census = Arc::new(CensusCache::with_total(826));

    Services {
        store: store.clone(),
        users: UserService::new(store.clone()),
        packs: PackOpener::new(store.clone(), catalog, census.clone()),
        progress: ProgressCalculator::new(store.clone(), census),
        trades: TradeEngine::new(store),
    }
}

#[tokio::test]
async fn test_register_open_progress_and_trade() {
    let svc = wire();

    // Two collectors, each with an empty album.
    let ana = svc.users.create("Ana", "ana@example.com").await.unwrap();
    let bob = svc.users.create("Bob", "bob@example.com").await.unwrap();

    // Each opens a pack from their own draw stream.
    let mut ana_draws = PackRng::seeded(1);
    let mut bob_draws = PackRng::seeded(2);
    let ana_cards = svc.packs.open_pack(ana.id, &mut ana_draws).await.unwrap();
    let bob_cards = svc.packs.open_pack(bob.id, &mut bob_draws).await.unwrap();

    assert_eq!(ana_cards.len(), PACK_SIZE);
    assert_eq!(bob_cards.len(), PACK_SIZE);
    assert!(ana_cards.iter().all(|c| c.album == ana.album_id));
    assert!(bob_cards.iter().all(|c| (1..=826).contains(&c.character_id)));

    // Progress reflects at most five distinct characters out of 826.
    let completion = svc.progress.completion(ana.id).await.unwrap();
    assert!(completion > 0.0);
    assert!(completion <= (PACK_SIZE as f64 / 826.0 * 100.0) + 0.01);

    // Ana offers her first card for Bob's first card.
    let offered = &ana_cards[0];
    let desired = &bob_cards[0];
    let proposal = svc
        .trades
        .propose(ana.id, offered.id, bob.id, desired.id)
        .await
        .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Pending);

    // Only Bob can accept.
    let err = svc.trades.accept(proposal.id, ana.id).await.unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let settled = svc.trades.accept(proposal.id, bob.id).await.unwrap();
    assert_eq!(settled.status, ProposalStatus::Accepted);

    // Ownership swapped both ways.
    assert_eq!(svc.store.card(offered.id).await.unwrap().album, bob.album_id);
    assert_eq!(svc.store.card(desired.id).await.unwrap().album, ana.album_id);

    // The settled proposal is history now: not re-acceptable, not
    // deletable.
    assert_eq!(
        svc.trades.accept(proposal.id, bob.id).await.unwrap_err().kind(),
        "invalid_state"
    );
    assert_eq!(
        svc.trades.delete(proposal.id).await.unwrap_err().kind(),
        "invalid_state"
    );

    // The detail view resolves both parties and both cards after the
    // swap.
    let detail = svc.trades.detail(proposal.id).await.unwrap();
    assert_eq!(detail.status, ProposalStatus::Accepted);
    assert_eq!(detail.offering.name, "Ana");
    assert_eq!(detail.receiving.name, "Bob");
    assert_eq!(detail.offered.character_name, offered.character_name);
}

#[tokio::test]
async fn test_stale_proposal_fails_after_card_moves() {
    let svc = wire();

    let ana = svc.users.create("Ana", "ana@example.com").await.unwrap();
    let bob = svc.users.create("Bob", "bob@example.com").await.unwrap();
    let carol = svc.users.create("Carol", "carol@example.com").await.unwrap();

    let mut draws = PackRng::seeded(3);
    let ana_cards = svc.packs.open_pack(ana.id, &mut draws).await.unwrap();
    let bob_cards = svc.packs.open_pack(bob.id, &mut draws).await.unwrap();
    let carol_cards = svc.packs.open_pack(carol.id, &mut draws).await.unwrap();

    // The same card of Ana's is promised to both Bob and Carol.
    let shared = &ana_cards[0];
    let to_bob = svc
        .trades
        .propose(ana.id, shared.id, bob.id, bob_cards[0].id)
        .await
        .unwrap();
    let to_carol = svc
        .trades
        .propose(ana.id, shared.id, carol.id, carol_cards[0].id)
        .await
        .unwrap();

    svc.trades.accept(to_bob.id, bob.id).await.unwrap();

    // The second accept re-validates ownership and must fail without
    // moving anything.
    let err = svc.trades.accept(to_carol.id, carol.id).await.unwrap_err();
    assert_eq!(err.kind(), "conflict");
    assert_eq!(
        svc.store.card(shared.id).await.unwrap().album,
        bob.album_id
    );
    assert_eq!(
        svc.store.card(carol_cards[0].id).await.unwrap().album,
        carol.album_id
    );

    // The stale proposal can now be cleaned up.
    svc.trades.delete(to_carol.id).await.unwrap();
}
