//! Key/value storage for client state that outlives a process.
//!
//! Only the cart is persisted. Values are JSON strings; the storage backends
//! do not look inside them.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used as a file name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be encoded as JSON.
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key/value store.
pub trait Storage: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mofresh-storage-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_dir_and_overwrites() {
        let dir = temp_dir("overwrite");
        let storage = FileStorage::new(&dir);

        assert_eq!(storage.get("mofresh_cart").unwrap(), None);
        storage.set("mofresh_cart", "[1]").unwrap();
        storage.set("mofresh_cart", "[2]").unwrap();
        assert_eq!(storage.get("mofresh_cart").unwrap().as_deref(), Some("[2]"));
        assert!(dir.join("mofresh_cart.json").exists());
        assert!(!dir.join("mofresh_cart.json.tmp").exists());

        storage.remove("mofresh_cart").unwrap();
        assert_eq!(storage.get("mofresh_cart").unwrap(), None);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let storage = FileStorage::new(temp_dir("keys"));
        for key in ["", "../etc/passwd", "a/b", ".hidden"] {
            assert!(matches!(storage.get(key), Err(StorageError::InvalidKey(_))), "key: {key}");
        }
    }
}
