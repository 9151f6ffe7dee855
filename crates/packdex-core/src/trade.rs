//! Trade proposals and their lifecycle.
//!
//! A proposal is created `Pending` and terminated by exactly one of
//! accept (status becomes `Accepted`, terminal) or delete (the record is
//! removed; deletion is not a status value).

use crate::ids::{CardId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proposal status. Monotonic: once `Accepted`, the proposal is history
/// and no further transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProposalStatus {
    Pending,
    Accepted,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Accepted => write!(f, "ACCEPTED"),
        }
    }
}

/// A request to exchange two specific cards between two specific users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeProposal {
    pub id: ProposalId,
    pub offer_user: UserId,
    pub receive_user: UserId,
    pub offered_card: CardId,
    pub desired_card: CardId,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

impl TradeProposal {
    /// Whether the proposal can still be accepted or withdrawn.
    pub fn is_pending(&self) -> bool {
        self.status == ProposalStatus::Pending
    }
}
