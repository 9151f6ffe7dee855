//! Shared application state for axum handlers.

use packdex_engine::{PackOpener, PackRng, ProgressCalculator, TradeEngine, UserService};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the handlers need, cheap to clone.
///
/// The pack RNG sits behind an async mutex: pack opening awaits catalog
/// lookups while holding the draw stream, and packs drawn from one
/// stream must not interleave.
#[derive(Clone)]
pub struct ApiState {
    pub users: Arc<UserService>,
    pub packs: Arc<PackOpener>,
    pub progress: Arc<ProgressCalculator>,
    pub trades: Arc<TradeEngine>,
    pub draws: Arc<Mutex<PackRng>>,
}

impl ApiState {
    pub fn new(
        users: UserService,
        packs: PackOpener,
        progress: ProgressCalculator,
        trades: TradeEngine,
        draws: PackRng,
    ) -> Self {
        Self {
            users: Arc::new(users),
            packs: Arc::new(packs),
            progress: Arc::new(progress),
            trades: Arc::new(trades),
            draws: Arc::new(Mutex::new(draws)),
        }
    }
}
