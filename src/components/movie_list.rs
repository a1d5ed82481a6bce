//! Search Results
//!
//! Left box: loader, error or the list of matches. Clicking a row
//! opens it in the detail panel (clicking the open one closes it).

use leptos::prelude::*;
use leptos::task::spawn_local;
use popcorn_core::{QueryStatus, SearchResultItem};

use crate::components::{ErrorMessage, Loader};
use crate::context::use_app_context;

#[component]
pub fn SearchResults() -> impl IntoView {
    let ctx = use_app_context();
    let status = Memo::new(move |_| ctx.read(|state| state.query.status.clone()));

    move || match status.get() {
        QueryStatus::Loading => view! { <Loader /> }.into_any(),
        QueryStatus::Failed(message) => view! { <ErrorMessage message=message /> }.into_any(),
        QueryStatus::Idle | QueryStatus::Loaded(_) => view! { <MovieList /> }.into_any(),
    }
}

#[component]
pub fn MovieList() -> impl IntoView {
    let ctx = use_app_context();
    let results = Memo::new(move |_| ctx.read(|state| state.query.results().to_vec()));

    view! {
        <ul class="list list-movies">
            <For
                each=move || results.get()
                key=|movie| movie.id.clone()
                children=move |movie| view! { <MovieRow movie=movie /> }
            />
        </ul>
    }
}

#[component]
fn MovieRow(movie: SearchResultItem) -> impl IntoView {
    let ctx = use_app_context();
    let id = movie.id.clone();
    let alt = format!("{} poster", movie.title);

    view! {
        <li on:click=move |_| spawn_local(ctx.controller().select(id.clone()))>
            <img src=movie.poster_url alt=alt />
            <h3>{movie.title}</h3>
            <div>
                <p>
                    <span>"🗓"</span>
                    <span>{movie.year}</span>
                </p>
            </div>
        </li>
    }
}
