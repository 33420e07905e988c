//! `localStorage` adapter

use insight_core::{Error, KeyValueStore, Result};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Session storage backed by the browser's `localStorage`.
///
/// When storage is unavailable (private mode, sandboxed iframe) every
/// operation fails and the session lives in memory only.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable, session will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| Error::storage("localStorage unavailable"))
    }
}

fn js_error(err: &JsValue) -> Error {
    Error::storage(format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(|e| js_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(|e| js_error(&e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(|e| js_error(&e))
    }
}
