//! Opaque string key-value persistence used by the history and blog
//! repositories.

mod file;
mod memory;

use serde::{Serialize, de::DeserializeOwned};

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a key that does not exist is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Reads a JSON array stored under `key`. Data that fails to parse is
/// logged and read as empty.
pub(crate) fn read_list<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(vec![]);
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            log::warn!("Ignoring unreadable data under {key}: {err}");
            Ok(vec![])
        }
    }
}

pub(crate) fn write_list<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(items)?;
    store.set(key, &json)
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
