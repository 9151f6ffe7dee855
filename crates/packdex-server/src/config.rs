//! Application configuration.

use crate::error::{AppError, AppResult};
use packdex_api::ApiConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file location.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Character catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API root of the character catalog.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://rickandmortyapi.com/api".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub api: ApiConfig,

    /// Fixed seed for the pack draw stream. Unset means entropy-seeded;
    /// set it only for reproducible demo environments.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Resolve and load configuration.
    ///
    /// Precedence: explicit path > `PACKDEX_CONFIG` env var > default
    /// location. A missing file at the default location falls back to
    /// built-in defaults with a warning.
    pub fn load(path_override: Option<&str>) -> AppResult<Self> {
        let config_path = path_override
            .map(str::to_string)
            .or_else(|| std::env::var("PACKDEX_CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
