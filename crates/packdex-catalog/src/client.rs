//! HTTP client for the character catalog.

use crate::error::{CatalogError, CatalogResult};
use crate::source::CharacterSource;
use crate::types::{CensusResponse, CharacterRecord, RawCharacter};
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for catalog requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the character catalog REST API.
///
/// Character records never change in a way the album cares about, so
/// successful lookups are memoized for the process lifetime.
pub struct CharacterClient {
    client: Client,
    base_url: String,
    memo: DashMap<u64, CharacterRecord>,
}

impl CharacterClient {
    /// Create a new catalog client.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g. "https://rickandmortyapi.com/api")
    pub fn new(base_url: impl Into<String>) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            memo: DashMap::new(),
        })
    }

    /// Number of memoized character records.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

#[async_trait]
impl CharacterSource for CharacterClient {
    async fn character(&self, id: u64) -> CatalogResult<CharacterRecord> {
        if let Some(hit) = self.memo.get(&id) {
            debug!(character_id = id, "Catalog memo hit");
            return Ok(hit.clone());
        }

        let url = format!("{}/character/{id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Http(format!("HTTP {status}: {body}")));
        }

        let raw: RawCharacter = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(format!("character {id}: {e}")))?;

        let record = CharacterRecord::from(raw);
        debug!(character_id = id, name = %record.name, "Fetched character");
        self.memo.insert(id, record.clone());
        Ok(record)
    }

    async fn total_count(&self) -> CatalogResult<u32> {
        let url = format!("{}/character", self.base_url);
        info!(url = %url, "Fetching character census");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Http(format!("HTTP {status}: {body}")));
        }

        let census: CensusResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(format!("census envelope: {e}")))?;

        info!(count = census.info.count, "Character census fetched");
        Ok(census.info.count)
    }
}
