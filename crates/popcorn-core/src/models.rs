//! Catalog Models
//!
//! Data structures for search results, movie details and watch-list entries.
//! Field names on the wire follow the OMDb payload and the stored watch-list schema.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of a title search (matches the OMDb `Search` array)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster_url: String,
}

/// Full record for one title, parsed from the lookup endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// `None` when the catalog reports "N/A"
    pub runtime_minutes: Option<u32>,
    pub plot: String,
    pub release_date: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
    pub imdb_rating: Option<f64>,
}

impl MovieDetail {
    /// Runtime as shown in the detail header
    pub fn runtime_label(&self) -> String {
        match self.runtime_minutes {
            Some(minutes) => format!("{} min", minutes),
            None => "N/A".to_string(),
        }
    }

    pub fn imdb_rating_label(&self) -> String {
        match self.imdb_rating {
            Some(rating) => format!("{:.1}", rating),
            None => "N/A".to_string(),
        }
    }
}

/// Watch-list entry (matches the persisted schema)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster_url: String,
    #[serde(rename = "imdbRating", default, deserialize_with = "null_as_zero")]
    pub imdb_rating: f64,
    #[serde(rename = "Runtime", default, deserialize_with = "null_as_zero")]
    pub runtime_minutes: u32,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
    #[serde(rename = "countRatingDecisions", default)]
    pub rating_revision_count: u32,
}

/// Older lists store an unknown number as `null`
fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WatchedEntry {
    /// Build an entry from the shown movie and the confirmed rating
    pub fn from_detail(movie: &MovieDetail, user_rating: u8, rating_revision_count: u32) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year.clone(),
            poster_url: movie.poster_url.clone(),
            imdb_rating: movie.imdb_rating.unwrap_or(0.0),
            runtime_minutes: movie.runtime_minutes.unwrap_or(0),
            user_rating,
            rating_revision_count,
        }
    }
}
