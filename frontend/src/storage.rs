use gloo_utils::window;
use wasm_bindgen::JsValue;
use web_sys::Storage;
use workout_tracker_lib::{error::StorageError, store::KeyValueStore};

/// `window.localStorage`. When the browser refuses access, reads come back
/// empty and writes fail.
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn local() -> Self {
        let storage = window().local_storage().ok().flatten();
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Backend("local storage is not available".into()))
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(js_error),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Backend(format!("{e:?}"))
}
