//! Startup Configuration
//!
//! Optional JSON in `<script id="popcorn-config" type="application/json">`.

use popcorn_core::{AppConfig, ConfigError};

const CONFIG_ELEMENT_ID: &str = "popcorn-config";

/// Configuration from the page, falling back to defaults.
/// The error is returned so it can be logged once logging is up.
pub fn load_config() -> (AppConfig, Option<ConfigError>) {
    let raw = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        None => (AppConfig::default(), None),
        Some(raw) if raw.trim().is_empty() => (AppConfig::default(), None),
        Some(raw) => match AppConfig::from_json(&raw) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    }
}
