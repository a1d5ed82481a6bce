//! Watch-list Panel
//!
//! Right box when no movie is selected: summary plus the watched list.

use leptos::prelude::*;
use popcorn_core::WatchedEntry;

use crate::components::MovieDetails;
use crate::context::use_app_context;

#[component]
pub fn WatchedPanel() -> impl IntoView {
    let ctx = use_app_context();
    let is_open = Memo::new(move |_| ctx.read(|state| state.detail.is_open()));

    view! {
        <Show
            when=move || is_open.get()
            fallback=|| view! {
                <WatchedSummary />
                <WatchedMoviesList />
            }
        >
            <MovieDetails />
        </Show>
    }
}

#[component]
pub fn WatchedSummary() -> impl IntoView {
    let ctx = use_app_context();
    let stats = Memo::new(move |_| ctx.read(|state| state.watched.stats()));

    view! {
        <div class="summary">
            <h2>"Movies you watched"</h2>
            <div>
                <p>
                    <span>"#️⃣"</span>
                    <span>{move || stats.get().count} " movies"</span>
                </p>
                <p>
                    <span>"⭐️"</span>
                    <span>{move || format!("{:.2}", stats.get().avg_imdb_rating)}</span>
                </p>
                <p>
                    <span>"🌟"</span>
                    <span>{move || format!("{:.2}", stats.get().avg_user_rating)}</span>
                </p>
                <p>
                    <span>"⏳"</span>
                    <span>{move || format!("{:.2} min", stats.get().avg_runtime)}</span>
                </p>
            </div>
        </div>
    }
}

#[component]
pub fn WatchedMoviesList() -> impl IntoView {
    let ctx = use_app_context();
    let entries = Memo::new(move |_| ctx.read(|state| state.watched.entries().to_vec()));

    view! {
        <ul class="list">
            <For
                each=move || entries.get()
                key=|entry| entry.id.clone()
                children=move |entry| view! { <WatchedMovie entry=entry /> }
            />
        </ul>
    }
}

#[component]
fn WatchedMovie(entry: WatchedEntry) -> impl IntoView {
    let ctx = use_app_context();
    let id = entry.id.clone();
    let alt = format!("{} poster", entry.title);

    view! {
        <li>
            <img src=entry.poster_url alt=alt />
            <h3>{entry.title}</h3>
            <div>
                <p>
                    <span>"⭐️"</span>
                    <span>{entry.imdb_rating}</span>
                </p>
                <p>
                    <span>"🌟"</span>
                    <span>{entry.user_rating}</span>
                </p>
                <p>
                    <span>"⏳"</span>
                    <span>{entry.runtime_minutes} " min"</span>
                </p>
                <button
                    class="btn-delete"
                    on:click=move |_| {
                        ctx.controller().delete_watched(&id);
                    }
                >
                    "X"
                </button>
            </div>
        </li>
    }
}
