//! OMDb payload interpretation.
//!
//! Turns an HTTP status plus body into a classified outcome. Kept free of
//! any transport so every branch is testable.

use serde::Deserialize;
use tracing::debug;

use super::CatalogError;
use crate::models::{MovieDetail, SearchResultItem};

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchResultItem>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
}

fn check_status(status: u16) -> Result<(), CatalogError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(CatalogError::Transport { status })
    }
}

fn is_true(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

/// "148 min" -> 148
fn parse_runtime(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

/// "8.8" -> 8.8, "N/A" -> None
fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Classify a search reply.
pub fn interpret_search(status: u16, body: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
    check_status(status)?;

    let payload: SearchPayload =
        serde_json::from_str(body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    if !is_true(&payload.response) {
        debug!("Catalog search returned no match: {:?}", payload.error);
        return Err(CatalogError::NotFound);
    }

    Ok(payload.search)
}

/// Classify a lookup reply for `requested_id`.
pub fn interpret_lookup(requested_id: &str, status: u16, body: &str) -> Result<MovieDetail, CatalogError> {
    check_status(status)?;

    let payload: LookupPayload =
        serde_json::from_str(body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    if !is_true(&payload.response) {
        debug!("Catalog lookup for {} failed: {:?}", requested_id, payload.error);
        return Err(CatalogError::NotFound);
    }

    Ok(MovieDetail {
        id: payload.id.unwrap_or_else(|| requested_id.to_string()),
        title: payload.title,
        year: payload.year,
        poster_url: payload.poster,
        runtime_minutes: parse_runtime(&payload.runtime),
        plot: payload.plot,
        release_date: payload.released,
        actors: payload.actors,
        director: payload.director,
        genre: payload.genre,
        imdb_rating: parse_rating(&payload.imdb_rating),
    })
}
