//! Browser Storage
//!
//! `window.localStorage` as a key-value backend for the watch-list.

use popcorn_core::{KeyValueStore, StorageError};
use tracing::warn;

pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    /// Local storage of the current window; reads come back empty and
    /// writes fail when the browser denies access
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|win| win.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage is unavailable, the watch-list will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}
