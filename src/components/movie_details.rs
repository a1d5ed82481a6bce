//! Movie Details Panel
//!
//! Right box while a movie is selected. Escape closes it; the document
//! title follows the shown movie and is restored on close.

use leptos::prelude::*;
use popcorn_core::{DetailState, FocusPolicy, MovieDetail};
use tracing::warn;

use crate::components::{ErrorMessage, Loader, StarRating};
use crate::context::use_app_context;
use crate::keyboard::use_key;

/// What the panel body shows; rating changes do not touch it
#[derive(Debug, Clone, PartialEq)]
enum Panel {
    Closed,
    Loading,
    Failed(String),
    Shown(MovieDetail),
}

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|win| win.document()) {
        document.set_title(title);
    }
}

#[component]
pub fn MovieDetails() -> impl IntoView {
    let ctx = use_app_context();

    let panel = Memo::new(move |_| {
        ctx.read(|state| match &state.detail {
            DetailState::Closed => Panel::Closed,
            DetailState::Loading { .. } => Panel::Loading,
            DetailState::Failed { message, .. } => Panel::Failed(message.clone()),
            DetailState::Shown { movie, .. } => Panel::Shown(movie.clone()),
        })
    });

    use_key("Escape", FocusPolicy::Always, move || ctx.controller().close_detail());

    let title = Memo::new(move |_| ctx.read(|state| state.detail.page_title(&ctx.app_title())));
    Effect::new(move |_| set_document_title(&title.get()));
    on_cleanup(move || set_document_title(&ctx.app_title()));

    move || match panel.get() {
        Panel::Closed => ().into_any(),
        Panel::Loading => view! { <div class="details"><Loader /></div> }.into_any(),
        Panel::Failed(message) => view! {
            <div class="details">
                <BackButton />
                <ErrorMessage message=message />
            </div>
        }
        .into_any(),
        Panel::Shown(movie) => view! { <MovieOverview movie=movie /> }.into_any(),
    }
}

#[component]
fn BackButton() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <button class="btn-back" on:click=move |_| ctx.controller().close_detail()>
            "←"
        </button>
    }
}

#[component]
fn MovieOverview(movie: MovieDetail) -> impl IntoView {
    let ctx = use_app_context();
    let id = StoredValue::new(movie.id.clone());

    // Rating of this movie on the watch-list, if it is already there
    let watched_rating = Memo::new(move |_| ctx.read(|state| state.watched.user_rating(&id.get_value())));
    let draft_rating = Memo::new(move |_| {
        ctx.read(|state| state.detail.draft().and_then(|draft| draft.rating).unwrap_or(0))
    });

    let on_rate = Callback::new(move |rating: u8| {
        if let Err(e) = ctx.controller().rate(rating) {
            warn!("Rating rejected: {}", e);
        }
    });
    let on_add = move |_| {
        if let Err(e) = ctx.controller().add_watched() {
            warn!("Could not add movie: {}", e);
        }
    };

    let max_rating = ctx.controller().max_rating();
    let poster_alt = format!("Poster of {} movie", movie.title);
    let released = format!("{} • {}", movie.release_date, movie.runtime_label());
    let imdb = movie.imdb_rating_label();

    view! {
        <div class="details">
            <header>
                <BackButton />
                <img src=movie.poster_url alt=poster_alt />
                <div class="details-overview">
                    <h2>{movie.title}</h2>
                    <p>{released}</p>
                    <p>{movie.genre}</p>
                    <p>
                        <span>"⭐"</span>
                        {imdb} " IMDb Rating"
                    </p>
                </div>
            </header>

            <section>
                <div class="rating">
                    {move || match watched_rating.get() {
                        Some(rating) => view! {
                            <p>"You rated this movie " {rating} " ⭐"</p>
                        }
                        .into_any(),
                        None => view! {
                            <StarRating max_rating=max_rating rating=draft_rating on_rate=on_rate />
                            <Show when=move || { draft_rating.get() > 0 }>
                                <button class="btn-add" on:click=on_add>
                                    "+ Add to list"
                                </button>
                            </Show>
                        }
                        .into_any(),
                    }}
                </div>
                <p>
                    <em>{movie.plot}</em>
                </p>
                <p>"Starring: " {movie.actors}</p>
                <p>"Directed by " {movie.director}</p>
            </section>
        </div>
    }
}
