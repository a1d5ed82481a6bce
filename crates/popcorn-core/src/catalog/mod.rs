//! Remote movie catalog.
//!
//! The catalog is consumed through the `Catalog` trait so the controller can
//! run against OMDb in the browser and against scripted replies in tests.

mod omdb;
mod payload;

pub use omdb::OmdbClient;
pub use payload::{interpret_lookup, interpret_search};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MovieDetail, SearchResultItem};

/// Errors that can occur when talking to the catalog.
///
/// The `Display` text of `Transport` and `NotFound` is what the user sees.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP status outside the success range.
    #[error("Something went wrong")]
    Transport { status: u16 },

    /// The catalog answered `"Response": "False"`.
    #[error("Movie not found")]
    NotFound,

    /// Superseded by a newer request or torn down; never shown.
    #[error("Request cancelled")]
    Cancelled,

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not a catalog payload.
    #[error("Failed to parse response: {0}")]
    Malformed(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.to_string())
    }
}

/// Search and lookup against a movie catalog.
///
/// Futures are not `Send`: the browser event loop is single-threaded.
#[async_trait(?Send)]
pub trait Catalog {
    /// Search titles matching `query`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError>;

    /// Fetch the full record for one catalog identifier.
    async fn lookup(&self, id: &str) -> Result<MovieDetail, CatalogError>;
}
