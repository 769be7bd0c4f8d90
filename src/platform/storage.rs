//! Key/value blob storage
//!
//! Every persisted value is a JSON string under a fixed key. On the web this
//! is LocalStorage; natively each key is a `<key>.json` file in a directory.

use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A string store keyed by name
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Read and parse a JSON value. `Ok(None)` when the key is absent.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)
    }
}

/// In-memory store (tests, or when no backend is available)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Write then rename so a crash never leaves a truncated blob
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

/// Store whose every read and write fails, as on a full or read-only disk
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct BrokenStore;

#[cfg(test)]
impl BrokenStore {
    fn fault() -> StorageError {
        StorageError::Io(std::io::Error::other("device unavailable"))
    }
}

#[cfg(test)]
impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(Self::fault())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(Self::fault())
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(Self::fault())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_json() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_json::<u64>("playerCoins").unwrap(), None);

        store.save_json("playerCoins", &125u64).unwrap();
        assert_eq!(store.get("playerCoins").unwrap().as_deref(), Some("125"));
        assert_eq!(store.load_json::<u64>("playerCoins").unwrap(), Some(125));

        store.remove("playerCoins").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_json_error() {
        let mut store = MemoryStore::new();
        store.set("playerCoins", "{not json").unwrap();
        assert!(matches!(
            store.load_json::<u64>("playerCoins"),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn test_broken_store_reports_io() {
        let mut store = BrokenStore;
        assert!(matches!(store.get("playerStats"), Err(StorageError::Io(_))));
        assert!(matches!(
            store.save_json("playerCoins", &1u64),
            Err(StorageError::Io(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("blob-arena-store-{}", std::process::id()));
        let mut store = FileStore::open(&dir).unwrap();

        assert_eq!(store.get("gameSettings").unwrap(), None);
        store.set("gameSettings", r#"{"quality":"High"}"#).unwrap();
        assert!(dir.join("gameSettings.json").exists());
        assert_eq!(
            store.get("gameSettings").unwrap().as_deref(),
            Some(r#"{"quality":"High"}"#)
        );

        store.remove("gameSettings").unwrap();
        store.remove("gameSettings").unwrap();
        assert_eq!(store.get("gameSettings").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
