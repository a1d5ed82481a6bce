//! Watch-list
//!
//! In-memory list of watched movies. Ids are unique; `add` rejects duplicates.

use thiserror::Error;
use tracing::warn;

use crate::models::WatchedEntry;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WatchListError {
    #[error("Movie {0} is already on the watch-list")]
    AlreadyWatched(String),

    #[error("No movie is shown")]
    NothingSelected,

    #[error("Pick a rating before adding")]
    RatingMissing,

    #[error("Rating {0} is out of range")]
    RatingOutOfRange(u8),
}

/// Averages shown in the summary; all zero for an empty list
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WatchStats {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchList {
    entries: Vec<WatchedEntry>,
}

impl WatchList {
    /// Adopt a loaded list, dropping later duplicates of an id
    pub fn from_entries(entries: Vec<WatchedEntry>) -> Self {
        let mut list = Self::default();
        for entry in entries {
            if let Err(e) = list.add(entry) {
                warn!("Skipping stored row: {}", e);
            }
        }
        list
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// The rating the user gave `id`, if watched
    pub fn user_rating(&self, id: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.user_rating)
    }

    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), WatchListError> {
        if self.contains(&entry.id) {
            return Err(WatchListError::AlreadyWatched(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Returns whether an entry was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn stats(&self) -> WatchStats {
        WatchStats {
            count: self.entries.len(),
            avg_imdb_rating: average(self.entries.iter().map(|e| e.imdb_rating)),
            avg_user_rating: average(self.entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime: average(self.entries.iter().map(|e| f64::from(e.runtime_minutes))),
        }
    }
}
