//! usePopcorn Frontend App
//!
//! Navbar on top, search results on the left, detail panel or watch-list on the right.

use console_logger::LogHandle;
use leptos::prelude::*;
use popcorn_core::{AppConfig, AppController, KeyBindings, OmdbClient};
use tracing::error;

use crate::components::{
    ErrorMessage, Logo, NavBar, NumResults, RecentLogs, SearchBar, SearchResults, ToggleBox,
    WatchedPanel,
};
use crate::context::AppContext;
use crate::keyboard::install_key_listener;
use crate::storage::BrowserStorage;

#[component]
pub fn App(
    config: AppConfig,
    /// Recent log lines, shown when the app cannot start
    logs: Option<LogHandle>,
) -> impl IntoView {
    let catalog = match OmdbClient::new(config.catalog.clone()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Catalog client unavailable: {}", e);
            let lines = logs.map(|logs| logs.recent()).unwrap_or_default();
            return view! {
                <ErrorMessage message=e.to_string() />
                <RecentLogs lines=lines />
            }
            .into_any();
        }
    };

    let controller = AppController::new(catalog, BrowserStorage::local(), &config);
    let keys = KeyBindings::new();
    install_key_listener(keys.clone());

    // Provide context to all children
    let ctx = AppContext::new(controller, keys, config.app_title.clone());
    provide_context(ctx);

    // Abort in-flight requests on unmount
    on_cleanup(move || ctx.controller().shutdown());

    view! {
        <NavBar>
            <Logo />
            <SearchBar />
            <NumResults />
        </NavBar>

        <main class="main">
            <ToggleBox>
                <SearchResults />
            </ToggleBox>
            <ToggleBox>
                <WatchedPanel />
            </ToggleBox>
        </main>
    }
    .into_any()
}
