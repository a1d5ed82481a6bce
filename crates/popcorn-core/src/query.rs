//! Search Query State
//!
//! The status enum keeps loading, error and results mutually exclusive.

use crate::models::SearchResultItem;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryStatus {
    /// Blank query, nothing requested
    #[default]
    Idle,
    Loading,
    Loaded(Vec<SearchResultItem>),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub query: String,
    pub status: QueryStatus,
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Current results; empty unless the last query settled successfully
    pub fn results(&self) -> &[SearchResultItem] {
        match &self.status {
            QueryStatus::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// Blank queries never reach the catalog
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
