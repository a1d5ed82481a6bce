//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use popcorn_core::controller::SessionState;
use popcorn_core::{AppController, KeyBindings, OmdbClient};

use crate::storage::BrowserStorage;

pub type Controller = AppController<OmdbClient, BrowserStorage>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Owner of query, detail and watch-list state
    controller: StoredValue<Controller, LocalStorage>,
    /// Registry fed by the document keydown listener
    keys: StoredValue<KeyBindings, LocalStorage>,
    /// Bumped by the controller after every mutation
    version: ReadSignal<u64>,
    app_title: StoredValue<String>,
}

impl AppContext {
    pub fn new(controller: Controller, keys: KeyBindings, app_title: String) -> Self {
        let (version, set_version) = signal(0u64);
        controller.subscribe(move || {
            let _ = set_version.try_update(|v| *v += 1);
        });

        Self {
            controller: StoredValue::new_local(controller),
            keys: StoredValue::new_local(keys),
            version,
            app_title: StoredValue::new(app_title),
        }
    }

    pub fn controller(&self) -> Controller {
        self.controller.get_value()
    }

    pub fn keys(&self) -> KeyBindings {
        self.keys.get_value()
    }

    pub fn app_title(&self) -> String {
        self.app_title.get_value()
    }

    /// Read session state and subscribe the calling scope to changes
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        self.version.track();
        self.controller.with_value(|controller| controller.with_state(f))
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
