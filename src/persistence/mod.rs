//! Key/value persistence
//!
//! Records and settings are stored as strings under fixed keys, the way
//! LocalStorage works in the browser. Native builds and tests use the
//! in-memory store.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Persistence failures. Callers log these and fall back to defaults.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("stored value for {key} is not a valid number: {value:?}")]
    Parse { key: String, value: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// String key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// Read an unsigned integer; missing keys read as `None`
pub fn read_u32<S: Storage + ?Sized>(storage: &S, key: &str) -> Result<Option<u32>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    // Older saves may hold a float
    let parsed = trimmed
        .parse::<u32>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.floor() as u32)
        });
    parsed.map(Some).ok_or_else(|| PersistenceError::Parse {
        key: key.to_string(),
        value: raw.clone(),
    })
}

pub fn write_u32<S: Storage + ?Sized>(storage: &mut S, key: &str, value: u32) -> Result<()> {
    storage.set_item(key, &value.to_string())
}

/// In-memory store (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_read_u32_accepts_ints_and_floats() {
        let mut storage = MemoryStorage::new();
        storage.set_item("int", "7").unwrap();
        storage.set_item("float", "42.9").unwrap();
        assert_eq!(read_u32(&storage, "int").unwrap(), Some(7));
        assert_eq!(read_u32(&storage, "float").unwrap(), Some(42));
        assert_eq!(read_u32(&storage, "missing").unwrap(), None);
    }

    #[test]
    fn test_read_u32_rejects_garbage() {
        let mut storage = MemoryStorage::new();
        storage.set_item("bad", "lots").unwrap();
        storage.set_item("neg", "-3").unwrap();
        assert!(matches!(
            read_u32(&storage, "bad"),
            Err(PersistenceError::Parse { .. })
        ));
        assert!(read_u32(&storage, "neg").is_err());
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        write_u32(&mut storage, "n", 12).unwrap();
        assert_eq!(read_u32(&storage, "n").unwrap(), Some(12));
    }
}
