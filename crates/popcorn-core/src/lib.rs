//! Popcorn Core
//!
//! Framework-free half of the movie tracker:
//! - models: catalog records and watch-list entries
//! - catalog: remote search/lookup client and its error classification
//! - query / detail: request lifecycle state
//! - store / watchlist: persisted watch-list and its mutations
//! - keys: keyboard shortcut registry
//! - controller: the single owner of all session state

pub mod cancel;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod detail;
pub mod keys;
pub mod models;
pub mod query;
pub mod store;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

pub use cancel::CancelHandle;
pub use catalog::{Catalog, CatalogError, OmdbClient};
pub use config::{AppConfig, CatalogConfig, ConfigError};
pub use controller::AppController;
pub use detail::{DetailState, RatingDraft};
pub use keys::{FocusPolicy, KeyBinding, KeyBindings, KeyPress};
pub use models::{MovieDetail, SearchResultItem, WatchedEntry};
pub use query::{QueryState, QueryStatus};
pub use store::{KeyValueStore, MemoryStore, PersistedList, StorageError};
pub use watchlist::{WatchList, WatchListError, WatchStats};
