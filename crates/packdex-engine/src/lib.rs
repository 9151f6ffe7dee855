//! Domain engine for packdex.
//!
//! The three non-trivial pieces of the system live here:
//! - `PackOpener`: randomized pack generation with tiered rarity assignment
//! - `ProgressCalculator`: completion percentage and duplicate accounting
//! - `TradeEngine`: the proposal lifecycle with the atomic ownership swap
//!
//! plus `UserService` for account lifecycle and `DrawSource`/`PackRng`,
//! the injectable randomness the pack draws run on.

pub mod draw;
pub mod pack;
pub mod progress;
pub mod trade;
pub mod users;

pub use draw::{DrawSource, PackRng};
pub use pack::{PackOpener, PACK_SIZE};
pub use progress::{AlbumOverview, DuplicateKey, ProgressCalculator};
pub use trade::{TradeCard, TradeDetail, TradeEngine, TradeParty};
pub use users::{UserDetail, UserService};
