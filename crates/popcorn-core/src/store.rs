//! Persisted List Store
//!
//! A whole sequence of records serialized as one JSON array in a single
//! string-keyed slot. Every save overwrites the slot; a missing or corrupt
//! slot loads as an empty list.

use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage is unavailable")]
    Unavailable,

    #[error("Failed to write storage slot: {0}")]
    Write(String),

    #[error("Failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value backend (browser local storage, memory, ...)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot (e.g. with a corrupt value)
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed list persisted under one key
pub struct PersistedList<T, S> {
    store: S,
    key: String,
    _records: PhantomData<T>,
}

impl<T, S> PersistedList<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _records: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: no slot or an unreadable slot yields an empty list
    pub fn load(&self) -> Vec<T> {
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Ignoring unreadable storage slot '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the full list
    pub fn save(&self, records: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(&self.key, &raw)
    }
}
