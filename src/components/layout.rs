//! Layout Components
//!
//! Navbar, logo and the collapsible boxes.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NavBar(children: Children) -> impl IntoView {
    view! { <nav class="nav-bar">{children()}</nav> }
}

#[component]
pub fn Logo() -> impl IntoView {
    let title = use_app_context().app_title();

    view! {
        <div class="logo">
            <span role="img">"🍿"</span>
            <h1>{title}</h1>
        </div>
    }
}

/// Box with a `-`/`+` toggle that hides its content
#[component]
pub fn ToggleBox(children: ChildrenFn) -> impl IntoView {
    let (is_open, set_is_open) = signal(true);

    view! {
        <div class="box">
            <button class="btn-toggle" on:click=move |_| set_is_open.update(|open| *open = !*open)>
                {move || if is_open.get() { "-" } else { "+" }}
            </button>
            <Show when=move || is_open.get()>
                {children()}
            </Show>
        </div>
    }
}
