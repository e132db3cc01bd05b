//! Browser LocalStorage backend (wasm32 only)

use web_sys::Storage as WebStorage;

use super::{KeyValueStore, PersistenceError};

pub struct LocalStorageStore {
    storage: WebStorage,
}

impl LocalStorageStore {
    /// Grab `window.localStorage`
    pub fn open() -> Result<Self, PersistenceError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> PersistenceError {
    PersistenceError::Backend(format!("{err:?}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}
