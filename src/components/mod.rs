//! UI Components
//!
//! Leptos components for the search, detail and watch-list views.

mod layout;
mod movie_details;
mod movie_list;
mod search_bar;
mod star_rating;
mod status;
mod watched;

pub use layout::{Logo, NavBar, ToggleBox};
pub use movie_details::MovieDetails;
pub use movie_list::SearchResults;
pub use search_bar::{NumResults, SearchBar};
pub use star_rating::StarRating;
pub use status::{ErrorMessage, Loader, RecentLogs};
pub use watched::WatchedPanel;
