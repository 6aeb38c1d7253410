use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use log::{debug, warn};

use crate::error::SettingsError;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Storage is not available: {0}")]
    Unavailable(String),
    #[error("Failed to read `{key}` from storage: {message}")]
    Read { key: String, message: String },
    #[error("Failed to write `{key}` to storage: {message}")]
    Write { key: String, message: String },
}

/// Key/value persistent store holding text blobs, such as the browser `localStorage`
pub trait SettingsStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, for native targets and tests.
///
/// It can be created unavailable (every access fails) or read-only (writes fail)
/// to reproduce what browsers do with disabled storage or an exceeded quota.
#[derive(Debug)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    available: Cell<bool>,
    read_only: Cell<bool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            available: Cell::new(true),
            read_only: Cell::new(false),
        }
    }

    pub fn unavailable() -> Self {
        let storage = Self::new();
        storage.set_available(false);
        storage
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "memory storage is disabled".to_string(),
            ))
        }
    }
}

impl SettingsStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if self.read_only.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the settings blob under a single storage key
#[derive(Clone)]
pub struct SettingsPersistence {
    storage: Rc<dyn SettingsStorage>,
    key: String,
}

impl SettingsPersistence {
    pub fn new(storage: Rc<dyn SettingsStorage>, key: String) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Missing blob and storage failures both yield `None`
    pub fn load(&self) -> Option<String> {
        match self.storage.get_item(&self.key) {
            Ok(Some(blob)) => Some(blob),
            Ok(None) => {
                debug!("No settings found under `{}`", self.key);
                None
            }
            Err(err) => {
                warn!("Unable to read settings, using defaults: {err}");
                None
            }
        }
    }

    pub fn save(&self, blob: &str) -> Result<(), SettingsError> {
        self.storage
            .set_item(&self.key, blob)
            .map_err(|source| SettingsError::Storage {
                source,
                key: self.key.clone(),
            })?;
        debug!("Settings saved under `{}`: {blob}", self.key);
        Ok(())
    }
}
