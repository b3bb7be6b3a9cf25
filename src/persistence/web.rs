use super::BlobStore;
use crate::error::StoreError;

/// Browser LocalStorage, keys prefixed to avoid clashing with other pages
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    const PREFIX: &'static str = "tap_rush_";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

impl BlobStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = Self::storage()?;
        storage
            .get_item(&format!("{}{}", Self::PREFIX, key))
            .map_err(|_| StoreError::Unavailable(format!("get_item failed for '{key}'")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&format!("{}{}", Self::PREFIX, key), value)
            .map_err(|_| StoreError::Unavailable(format!("set_item failed for '{key}'")))
    }
}
