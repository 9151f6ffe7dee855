//! Collection storage for packdex.
//!
//! `CollectionStore` is the durable-storage seam: CRUD for users, albums,
//! cards and trade proposals, plus the transactional units the domain
//! needs (atomic user+album creation, all-or-nothing card batches, and
//! the compare-and-swap trade settlement). `MemoryStore` is the in-process
//! reference implementation; a durable backend must provide the same
//! atomicity guarantees.

pub mod error;
pub mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::{CollectionStore, SwapExpectation};
