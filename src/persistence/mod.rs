//! Best-effort key/value persistence
//!
//! Features:
//! - JSON values keyed by string (LocalStorage shape)
//! - Pluggable backends behind [`KeyValueStore`]
//! - Failures are logged and degrade to defaults / no-ops, never returned

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

/// Storage failures. Only backends see these; [`Storage`] swallows them.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage backend unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw string key/value capability (LocalStorage, a directory, a map)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Shared handle to one backend. Cloning shares the backend.
#[derive(Clone)]
pub struct Storage {
    backend: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// In-memory storage (tests, native fallback)
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Browser LocalStorage, falling back to memory when it is unavailable
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        match LocalStorageStore::open() {
            Ok(store) => Self::new(store),
            Err(err) => {
                log::warn!("LocalStorage unavailable ({err}), using in-memory storage");
                Self::in_memory()
            }
        }
    }

    /// Load and decode `key`, or return `default` when missing or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                log::error!("Error loading '{key}': {err}");
                default
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        match self.backend.get(key)? {
            // Empty string is treated like a missing entry
            Some(json) if !json.is_empty() => Ok(Some(serde_json::from_str(&json)?)),
            _ => Ok(None),
        }
    }

    /// Encode and write `value` under `key`. Failures are logged and dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(PersistenceError::from)
            .and_then(|json| self.backend.set(key, &json));
        if let Err(err) = result {
            log::error!("Error saving '{key}': {err}");
        }
    }

    /// Read a raw string value (no JSON decoding)
    pub fn load_token(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                log::error!("Error loading '{key}': {err}");
                None
            }
        }
    }

    /// Write a raw string value (no JSON encoding)
    pub fn save_token(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value) {
            log::error!("Error saving '{key}': {err}");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            log::error!("Error removing '{key}': {err}");
        }
    }

    /// Remove every key in `keys`, continuing past failures
    pub fn clear(&self, keys: &[&str]) {
        for key in keys {
            self.remove(key);
        }
    }
}
