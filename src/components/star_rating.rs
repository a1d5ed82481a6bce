//! Star Rating Component
//!
//! `max_rating` clickable stars. Hovering previews a value; the label
//! shows the hovered value, else the current one.

use leptos::prelude::*;

#[component]
pub fn StarRating(
    max_rating: u8,
    /// Current value, 0 when nothing is picked
    #[prop(into)]
    rating: Signal<u8>,
    on_rate: Callback<u8>,
    #[prop(optional, into)] size: Option<u32>,
) -> impl IntoView {
    let (hovered, set_hovered) = signal(0u8);
    let size = size.unwrap_or(24);
    let shown = move || {
        let hovered = hovered.get();
        if hovered > 0 { hovered } else { rating.get() }
    };

    let star_style = format!("width: {size}px; height: {size}px; display: block; cursor: pointer;");
    let label_style = format!("line-height: 1; margin: 0; font-size: {}px;", size * 2 / 3);

    view! {
        <div class="star-rating">
            <div class="stars">
                {(1..=max_rating)
                    .map(|value| {
                        let style = star_style.clone();
                        view! {
                            <span
                                role="button"
                                style=style
                                on:click=move |_| on_rate.run(value)
                                on:mouseenter=move |_| set_hovered.set(value)
                                on:mouseleave=move |_| set_hovered.set(0)
                            >
                                {move || if shown() >= value { "★" } else { "☆" }}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
            <p style=label_style>
                {move || match shown() {
                    0 => String::new(),
                    value => value.to_string(),
                }}
            </p>
        </div>
    }
}
