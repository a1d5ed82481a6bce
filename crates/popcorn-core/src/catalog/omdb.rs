//! OMDb API client.
//!
//! Both endpoints are a GET on the same base URL: `s=` searches titles,
//! `i=` looks up one identifier. Works on wasm32 (fetch) and native.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::payload::{interpret_lookup, interpret_search};
use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;
use crate::models::{MovieDetail, SearchResultItem};

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| CatalogError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// GET the base URL with the api key plus `param`, returning status and body.
    async fn get(&self, param: (&str, &str)) -> Result<(u16, String), CatalogError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), param])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait(?Send)]
impl Catalog for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        debug!("OMDb search: query='{}'", query);
        let (status, body) = self.get(("s", query)).await?;
        interpret_search(status, &body)
    }

    async fn lookup(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        debug!("OMDb lookup: id={}", id);
        let (status, body) = self.get(("i", id)).await?;
        interpret_lookup(id, status, &body)
    }
}
