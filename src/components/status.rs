//! Loading and error placeholders.

use leptos::prelude::*;

#[component]
pub fn Loader() -> impl IntoView {
    view! { <p class="loader">"Loading..."</p> }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <p class="error">
            <span>"💀 "</span>
            {message}
        </p>
    }
}

/// Log lines under a fatal error, oldest first
#[component]
pub fn RecentLogs(lines: Vec<String>) -> impl IntoView {
    (!lines.is_empty()).then(|| view! { <pre class="recent-logs">{lines.join("\n")}</pre> })
}
