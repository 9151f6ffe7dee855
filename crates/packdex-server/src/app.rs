//! Main application orchestration.
//!
//! Wires the components together: in-memory collection store, catalog
//! client, census cache, the four domain services, and the API server.

use crate::config::AppConfig;
use crate::error::AppResult;
use packdex_api::{run_server, ApiState};
use packdex_catalog::{CensusCache, CharacterClient};
use packdex_engine::{PackOpener, PackRng, ProgressCalculator, TradeEngine, UserService};
use packdex_store::MemoryStore;
use std::sync::Arc;
use tracing::info;

/// Main application.
pub struct Application {
    config: AppConfig,
    store: Arc<MemoryStore>,
    catalog: Arc<CharacterClient>,
    census: Arc<CensusCache>,
}

impl Application {
    /// Create a new application from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = Arc::new(MemoryStore::new());
        let catalog = Arc::new(CharacterClient::new(&config.catalog.base_url)?);
        let census = Arc::new(CensusCache::new());

        Ok(Self {
            config,
            store,
            catalog,
            census,
        })
    }

    /// Load the character census at startup.
    ///
    /// Falls back to a fixed total with a logged warning if the catalog
    /// is unreachable; pack opening reports `Unavailable` until a total
    /// is in place, so this never blocks startup.
    pub async fn prime_census(&self) -> u32 {
        self.census.prime(self.catalog.as_ref()).await
    }

    /// Run the API server until shutdown.
    pub async fn run(self) -> AppResult<()> {
        let draws = match self.config.rng_seed {
            Some(seed) => {
                info!(seed, "Using fixed pack RNG seed");
                PackRng::seeded(seed)
            }
            None => PackRng::from_entropy(),
        };

        let state = ApiState::new(
            UserService::new(self.store.clone()),
            PackOpener::new(
                self.store.clone(),
                self.catalog.clone(),
                self.census.clone(),
            ),
            ProgressCalculator::new(self.store.clone(), self.census.clone()),
            TradeEngine::new(self.store.clone()),
            draws,
        );

        run_server(state, self.config.api.clone()).await?;
        Ok(())
    }
}
