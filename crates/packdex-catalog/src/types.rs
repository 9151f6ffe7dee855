//! Catalog record types and wire DTOs.

use packdex_core::VitalStatus;
use serde::Deserialize;

/// A character as the rest of the system sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub id: u64,
    pub name: String,
    pub status: VitalStatus,
}

/// Raw character payload from `GET /character/{id}`.
///
/// The catalog returns many more fields (species, origin, episodes...);
/// only the ones the album cares about are deserialized.
#[derive(Debug, Deserialize)]
pub struct RawCharacter {
    pub id: u64,
    pub name: String,
    pub status: String,
}

impl From<RawCharacter> for CharacterRecord {
    fn from(raw: RawCharacter) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            status: VitalStatus::parse(&raw.status),
        }
    }
}

/// Paging envelope from `GET /character`, used only for the total count.
#[derive(Debug, Deserialize)]
pub struct CensusResponse {
    pub info: CensusInfo,
}

#[derive(Debug, Deserialize)]
pub struct CensusInfo {
    pub count: u32,
}
