//! Character catalog access for packdex.
//!
//! The catalog is an external REST service providing character records
//! (name, vital status) and the total number of known characters. This
//! crate provides the HTTP client, the `CharacterSource` seam the engine
//! consumes, and the census cache holding the total count as explicit,
//! re-checkable state.

pub mod census;
pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use census::{CensusCache, FALLBACK_TOTAL};
pub use client::CharacterClient;
pub use error::{CatalogError, CatalogResult};
pub use source::CharacterSource;
pub use types::CharacterRecord;
