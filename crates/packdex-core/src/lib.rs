//! Core domain types for the packdex sticker-album service.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `UserId`, `AlbumId`, `CardId`, `ProposalId`: entity identifiers
//! - `User`, `Album`, `Card`: the collection model
//! - `Rarity`, `VitalStatus`: the rarity-assignment table
//! - `TradeProposal`, `ProposalStatus`: the trade lifecycle
//! - `DomainError`: the error taxonomy every operation returns

pub mod album;
pub mod error;
pub mod ids;
pub mod rarity;
pub mod trade;

pub use album::{Album, Card, CardDraft, User};
pub use error::{DomainError, DomainResult};
pub use ids::{AlbumId, CardId, ProposalId, UserId};
pub use rarity::{Rarity, VitalStatus};
pub use trade::{ProposalStatus, TradeProposal};
