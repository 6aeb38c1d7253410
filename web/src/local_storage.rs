use client_settings::{SettingsStorage, StorageError};

use crate::utils::{get_local_storage, js_error};

/// `window.localStorage`, looked up on every access as browsers may disable it at any time
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocalStorage;

impl SettingsStorage for BrowserLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage =
            get_local_storage().map_err(|err| StorageError::Unavailable(err.to_string()))?;
        storage.get_item(key).map_err(|err| StorageError::Read {
            key: key.to_string(),
            message: js_error(err).to_string(),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage =
            get_local_storage().map_err(|err| StorageError::Unavailable(err.to_string()))?;
        storage.set_item(key, value).map_err(|err| StorageError::Write {
            key: key.to_string(),
            message: js_error(err).to_string(),
        })
    }
}
