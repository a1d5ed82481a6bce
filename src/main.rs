//! usePopcorn Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod keyboard;
mod storage;

use app::App;
use leptos::prelude::*;
use tracing::{info, warn};

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = config::load_config();
    let logs = match console_logger::init_logger(&config.app_title, &config.log_level, config.log_capacity) {
        Ok(logs) => Some(logs),
        Err(e) => {
            web_sys::console::error_1(&format!("Logger setup failed: {}", e).into());
            None
        }
    };
    if let Some(e) = config_error {
        warn!("Using default configuration: {}", e);
    }
    info!("{} starting, watch-list key '{}'", config.app_title, config.storage_key);

    mount_to_body(move || view! { <App config=config logs=logs /> });
}
