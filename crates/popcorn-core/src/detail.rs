//! Detail Panel State
//!
//! Closed -> Loading -> Shown (or Failed); any open state closes on
//! Escape, back or re-selecting the same id.

use crate::models::MovieDetail;

/// Rating picked in the open panel, with the number of times it changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDraft {
    pub rating: Option<u8>,
    pub revisions: u32,
}

impl RatingDraft {
    /// Only an actual change of value counts as a revision
    pub fn set(&mut self, rating: u8) {
        if self.rating != Some(rating) {
            self.rating = Some(rating);
            self.revisions += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        id: String,
    },
    Shown {
        movie: MovieDetail,
        draft: RatingDraft,
    },
    Failed {
        id: String,
        message: String,
    },
}

impl DetailState {
    /// Id of the selected movie, if any
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { id } | DetailState::Failed { id, .. } => Some(id),
            DetailState::Shown { movie, .. } => Some(&movie.id),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }

    pub fn movie(&self) -> Option<&MovieDetail> {
        match self {
            DetailState::Shown { movie, .. } => Some(movie),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&RatingDraft> {
        match self {
            DetailState::Shown { draft, .. } => Some(draft),
            _ => None,
        }
    }
}

/// Document title while `movie` is shown
pub fn document_title(movie: &MovieDetail) -> String {
    format!("Movie | {}", movie.title)
}

impl DetailState {
    /// Title for the browser tab; `app_title` unless a movie is shown
    pub fn page_title(&self, app_title: &str) -> String {
        match self.movie() {
            Some(movie) => document_title(movie),
            None => app_title.to_string(),
        }
    }
}
