//! `window.localStorage` as session storage.

use meditrack_auth::{SessionStorage, StorageError};
use wasm_bindgen::JsValue;

/// Handle to the browser's `localStorage`.
///
/// Holds nothing itself; every call looks the storage up again, so it is
/// `Send + Sync` and can back the API client's token source.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn backend() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(js_error)?
            .ok_or(StorageError::Unavailable)
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::backend()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::backend()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::backend()?.remove_item(key).map_err(js_error)
    }

    fn clear(&self) -> Result<(), StorageError> {
        Self::backend()?.clear().map_err(js_error)
    }
}
