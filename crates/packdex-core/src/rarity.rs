//! Rarity tiers and the status-keyed assignment table.
//!
//! A card's rarity is fixed at creation from the source character's vital
//! status and a uniform roll in `[0, 100)`:
//!
//! | status | roll < threshold | roll >= threshold |
//! |--------|------------------|-------------------|
//! | Alive  | <70: Common      | Rare              |
//! | Dead   | <60: Rare        | Legendary         |
//! | other  | Special          | Special           |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier of a card. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
    Special,
}

impl Rarity {
    /// Assign a rarity from a character's vital status and a uniform roll
    /// in `[0, 100)`.
    ///
    /// The thresholds are boundary-exact: Alive 69 -> Common, 70 -> Rare;
    /// Dead 59 -> Rare, 60 -> Legendary.
    pub fn assign(status: VitalStatus, roll: u8) -> Self {
        match status {
            VitalStatus::Alive => {
                if roll < 70 {
                    Self::Common
                } else {
                    Self::Rare
                }
            }
            VitalStatus::Dead => {
                if roll < 60 {
                    Self::Rare
                } else {
                    Self::Legendary
                }
            }
            VitalStatus::Other => Self::Special,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Common => write!(f, "COMMON"),
            Self::Rare => write!(f, "RARE"),
            Self::Legendary => write!(f, "LEGENDARY"),
            Self::Special => write!(f, "SPECIAL"),
        }
    }
}

/// Vital status of a catalog character, parsed case-insensitively.
///
/// Anything that is neither "Alive" nor "Dead" (the catalog reports
/// "unknown", but any other value counts) collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalStatus {
    Alive,
    Dead,
    Other,
}

impl VitalStatus {
    /// Parse a raw catalog status string.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("alive") {
            Self::Alive
        } else if raw.eq_ignore_ascii_case("dead") {
            Self::Dead
        } else {
            Self::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_boundary() {
        assert_eq!(Rarity::assign(VitalStatus::Alive, 0), Rarity::Common);
        assert_eq!(Rarity::assign(VitalStatus::Alive, 69), Rarity::Common);
        assert_eq!(Rarity::assign(VitalStatus::Alive, 70), Rarity::Rare);
        assert_eq!(Rarity::assign(VitalStatus::Alive, 99), Rarity::Rare);
    }

    #[test]
    fn test_dead_boundary() {
        assert_eq!(Rarity::assign(VitalStatus::Dead, 0), Rarity::Rare);
        assert_eq!(Rarity::assign(VitalStatus::Dead, 59), Rarity::Rare);
        assert_eq!(Rarity::assign(VitalStatus::Dead, 60), Rarity::Legendary);
        assert_eq!(Rarity::assign(VitalStatus::Dead, 99), Rarity::Legendary);
    }

    #[test]
    fn test_other_status_is_always_special() {
        for roll in [0, 42, 99] {
            assert_eq!(Rarity::assign(VitalStatus::Other, roll), Rarity::Special);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(VitalStatus::parse("Alive"), VitalStatus::Alive);
        assert_eq!(VitalStatus::parse("ALIVE"), VitalStatus::Alive);
        assert_eq!(VitalStatus::parse("dead"), VitalStatus::Dead);
        assert_eq!(VitalStatus::parse("DeAd"), VitalStatus::Dead);
        assert_eq!(VitalStatus::parse("unknown"), VitalStatus::Other);
        assert_eq!(VitalStatus::parse(""), VitalStatus::Other);
    }

    #[test]
    fn test_rarity_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Rarity::Legendary).unwrap(), "\"LEGENDARY\"");
        assert_eq!(Rarity::Common.to_string(), "COMMON");
    }
}
