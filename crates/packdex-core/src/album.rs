//! Users, albums and cards.
//!
//! References are one-directional ownership edges: a `Card` points at its
//! `Album`, an `Album` points at its owning `User`. Reverse navigation
//! (a user's album, an album's cards) is always a store query, never a
//! live back-pointer.

use crate::ids::{AlbumId, CardId, UserId};
use crate::rarity::Rarity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Owns exactly one album, created with the user in
/// one atomic write and deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Globally unique.
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A collection container. The card set is derived by query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub owner: UserId,
}

/// A single collectible unit.
///
/// `album` is the only mutable field; a settled trade is the only thing
/// that changes it. A card belongs to exactly one album at any instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Character id in the external catalog. Not unique per card:
    /// duplicates are expected and meaningful.
    pub character_id: u64,
    /// Denormalized at creation time.
    pub character_name: String,
    /// Fixed at creation, immutable thereafter.
    pub rarity: Rarity,
    pub album: AlbumId,
}

/// A card before persistence: everything but the store-allocated id and
/// the album assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub character_id: u64,
    pub character_name: String,
    pub rarity: Rarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serializes_with_uppercase_rarity() {
        let card = Card {
            id: CardId::new(1),
            character_id: 5,
            character_name: "Rick Sanchez".to_string(),
            rarity: Rarity::Rare,
            album: AlbumId::new(2),
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["rarity"], "RARE");
        assert_eq!(json["album"], 2);
    }
}
