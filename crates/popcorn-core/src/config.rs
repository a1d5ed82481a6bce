//! Application Configuration
//!
//! Every field has a default, so an empty document (or none at all) is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";
const DEFAULT_OMDB_KEY: &str = "82e8dca2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// OMDb API client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_OMDB_KEY.to_string(),
            base_url: DEFAULT_OMDB_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    /// Storage slot holding the watch-list
    pub storage_key: String,
    /// Document title when no movie is open
    pub app_title: String,
    /// Number of stars in the rating widget
    pub max_rating: u8,
    /// Log lines kept in the console logger's buffer
    pub log_capacity: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            storage_key: "watched".to_string(),
            app_title: "usePopcorn".to_string(),
            max_rating: 10,
            log_capacity: 200,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog.api_key must not be empty".to_string()));
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog.base_url must not be empty".to_string()));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".to_string()));
        }
        if !(1..=10).contains(&self.max_rating) {
            return Err(ConfigError::Invalid(format!(
                "max_rating must be between 1 and 10, got {}",
                self.max_rating
            )));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid("log_capacity must be positive".to_string()));
        }
        Ok(())
    }
}
