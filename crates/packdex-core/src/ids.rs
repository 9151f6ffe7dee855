//! Entity identifiers.
//!
//! All ids are store-allocated sequential values wrapped in newtypes so
//! that a card id can never be passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user.
    UserId
);

entity_id!(
    /// Identifier of a user's album.
    AlbumId
);

entity_id!(
    /// Identifier of a single collectible card.
    ///
    /// Distinct from the external character id: many cards may map to the
    /// same character.
    CardId
);

entity_id!(
    /// Identifier of a trade proposal.
    ProposalId
);
