//! Key-value persistence boundary.
//!
//! The record store only ever needs `get`/`set` of whole string values, so the
//! backends stay trivial: one file per key on disk, or a map in memory.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::StorageError;

/// Scoped string key-value surface used for durable and session state.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as a file inside a directory.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a reader sees either the previous snapshot or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Creates the store, creating `dir` if needed.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;
        tracing::debug!(key, bytes = value.len(), "persisted key");
        Ok(())
    }
}

/// Process-local store; used for session state and in tests.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|e| StorageError::Backend(e.to_string()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trips_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("quotes").unwrap(), None);
        store.set("quotes", "[1]").unwrap();
        store.set("quotes", "[2]").unwrap();
        assert_eq!(store.get("quotes").unwrap().as_deref(), Some("[2]"));
        assert!(!dir.path().join("nested").join("quotes.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(store.get(key), Err(StorageError::InvalidKey(_))), "{key}");
        }
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
