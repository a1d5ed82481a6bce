//! Search Bar Component
//!
//! Query input plus the result counter. Enter anywhere outside a text
//! field focuses the input and clears the query.

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use popcorn_core::FocusPolicy;

use crate::context::use_app_context;
use crate::keyboard::use_key;

#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_app_context();
    let input_ref = NodeRef::<Input>::new();

    use_key("Enter", FocusPolicy::UnlessTyping, move || {
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
        spawn_local(ctx.controller().set_query(""));
    });

    view! {
        <input
            class="search"
            type="text"
            placeholder="Search movies..."
            node_ref=input_ref
            prop:value=move || ctx.read(|state| state.query.query.clone())
            on:input=move |ev| {
                spawn_local(ctx.controller().set_query(event_target_value(&ev)));
            }
        />
    }
}

#[component]
pub fn NumResults() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <p class="num-results">
            "Found " <strong>{move || ctx.read(|state| state.query.results().len())}</strong> " results"
        </p>
    }
}
