//! Request and response DTOs.

use chrono::{DateTime, Utc};
use packdex_core::{Card, ProposalStatus, Rarity, TradeProposal};
use packdex_engine::{AlbumOverview, TradeDetail, UserDetail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- users ---

#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub album_id: u64,
    pub created_at: DateTime<Utc>,
}

impl From<UserDetail> for UserResponse {
    fn from(detail: UserDetail) -> Self {
        Self {
            id: detail.id.value(),
            name: detail.name,
            email: detail.email,
            album_id: detail.album_id.value(),
            created_at: detail.created_at,
        }
    }
}

// --- cards & albums ---

#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub id: u64,
    pub character_id: u64,
    pub character_name: String,
    pub rarity: Rarity,
    pub album_id: u64,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.value(),
            character_id: card.character_id,
            character_name: card.character_name,
            rarity: card.rarity,
            album_id: card.album.value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub completion: f64,
}

/// The album page: cards, completion, and duplicate counts keyed by
/// "Name (RARITY)".
#[derive(Debug, Serialize)]
pub struct AlbumResponse {
    pub album_id: u64,
    pub completion: f64,
    pub cards: Vec<CardResponse>,
    pub duplicates: BTreeMap<String, u32>,
}

impl From<AlbumOverview> for AlbumResponse {
    fn from(overview: AlbumOverview) -> Self {
        Self {
            album_id: overview.album_id.value(),
            completion: overview.completion,
            cards: overview.cards.into_iter().map(CardResponse::from).collect(),
            duplicates: overview
                .duplicates
                .into_iter()
                .map(|(key, n)| (key.to_string(), n))
                .collect(),
        }
    }
}

// --- trades ---

#[derive(Debug, Deserialize)]
pub struct ProposalRequest {
    pub offer_user_id: u64,
    pub offered_card_id: u64,
    pub receive_user_id: u64,
    pub desired_card_id: u64,
}

#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub id: u64,
    pub offer_user_id: u64,
    pub receive_user_id: u64,
    pub offered_card_id: u64,
    pub desired_card_id: u64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<TradeProposal> for ProposalResponse {
    fn from(proposal: TradeProposal) -> Self {
        Self {
            id: proposal.id.value(),
            offer_user_id: proposal.offer_user.value(),
            receive_user_id: proposal.receive_user.value(),
            offered_card_id: proposal.offered_card.value(),
            desired_card_id: proposal.desired_card.value(),
            status: proposal.status,
            created_at: proposal.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AcceptQuery {
    pub user_id: u64,
}

#[derive(Debug, Serialize)]
pub struct TradePartyResponse {
    pub user_id: u64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TradeCardResponse {
    pub card_id: u64,
    pub character_name: String,
    pub rarity: Rarity,
}

#[derive(Debug, Serialize)]
pub struct TradeDetailResponse {
    pub id: u64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub offering: TradePartyResponse,
    pub receiving: TradePartyResponse,
    pub offered: TradeCardResponse,
    pub desired: TradeCardResponse,
}

impl From<TradeDetail> for TradeDetailResponse {
    fn from(detail: TradeDetail) -> Self {
        Self {
            id: detail.id.value(),
            status: detail.status,
            created_at: detail.created_at,
            offering: TradePartyResponse {
                user_id: detail.offering.id.value(),
                name: detail.offering.name,
            },
            receiving: TradePartyResponse {
                user_id: detail.receiving.id.value(),
                name: detail.receiving.name,
            },
            offered: TradeCardResponse {
                card_id: detail.offered.id.value(),
                character_name: detail.offered.character_name,
                rarity: detail.offered.rarity,
            },
            desired: TradeCardResponse {
                card_id: detail.desired.id.value(),
                character_name: detail.desired.character_name,
                rarity: detail.desired.rarity,
            },
        }
    }
}
