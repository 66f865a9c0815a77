//! Durable key/value storage for small pieces of client state.
//!
//! Values are JSON text, one entry per key. Every read and write goes
//! through [`load_json`] / [`save_json`] / [`remove_key`], which log
//! failures as warnings and carry on, so a broken or read-only store only
//! costs persistence, never functionality.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub const LOGIN_ATTEMPTS_KEY: &str = "loginAttempts";
pub const SESSION_INFO_KEY: &str = "sessionInfo";
pub const LAST_LOGIN_TIME_KEY: &str = "lastLoginTime";
pub const CHAT_MINIMIZED_KEY: &str = "chatBarMinimized";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string-to-string store with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// In-memory store, used for tests and when no data directory is usable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store persisted as a single pretty-printed JSON object on disk.
///
/// The file is read once when opened; every mutation rewrites it. A missing
/// or unreadable file starts the store empty.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed storage file");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened storage file");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("file store poisoned".to_string()))?;
        f(&mut entries);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(&*entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("file store poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }
}

/// Read and decode `key`. Missing keys, read failures and malformed values
/// all yield `None`; failures are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "failed to decode stored value");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value");
            None
        }
    }
}

/// Encode and write `value` under `key`. Returns whether the write landed.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!(key, error = %e, "failed to encode value for storage");
            return false;
        }
    };
    match store.set(key, &encoded) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to write stored value");
            false
        }
    }
}

pub fn remove_key(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to remove stored value");
            false
        }
    }
}

/// Store that rejects every operation, standing in for disabled storage.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trips_json() {
        let store = MemoryStore::new();
        assert!(save_json(&store, CHAT_MINIMIZED_KEY, &true));
        assert_eq!(load_json::<bool>(&store, CHAT_MINIMIZED_KEY), Some(true));
        assert!(remove_key(&store, CHAT_MINIMIZED_KEY));
        assert_eq!(load_json::<bool>(&store, CHAT_MINIMIZED_KEY), None);
    }

    #[test]
    fn malformed_value_reads_as_none() {
        let store = MemoryStore::new();
        store.set(CHAT_MINIMIZED_KEY, "{not json").unwrap();
        assert_eq!(load_json::<bool>(&store, CHAT_MINIMIZED_KEY), None);
    }

    #[test]
    fn failing_store_degrades_quietly() {
        let store = FailingStore;
        assert!(!save_json(&store, CHAT_MINIMIZED_KEY, &true));
        assert_eq!(load_json::<bool>(&store, CHAT_MINIMIZED_KEY), None);
        assert!(!remove_key(&store, CHAT_MINIMIZED_KEY));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = JsonFileStore::open(&path);
        assert!(save_json(&store, LAST_LOGIN_TIME_KEY, &"2024-01-01T00:00:00Z"));
        drop(store);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            load_json::<String>(&reopened, LAST_LOGIN_TIME_KEY).as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
        reopened.remove(LAST_LOGIN_TIME_KEY).unwrap();
        assert_eq!(JsonFileStore::open(&path).get(LAST_LOGIN_TIME_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_ignores_garbage_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "garbage").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(SESSION_INFO_KEY).unwrap(), None);
    }
}
