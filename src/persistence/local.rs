//! Browser LocalStorage backend

use super::{PersistenceError, Result, Storage};

/// `window.localStorage`
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's LocalStorage (fails in private modes that block it)
    pub fn open() -> Result<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|_| PersistenceError::Unavailable)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| PersistenceError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| PersistenceError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
