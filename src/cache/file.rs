//! Key-value persistence backends for the verification store.
//!
//! [`FileStore`] keeps one file per key under `dirs::data_dir()/<namespace>/`
//! and writes through a temp file + rename so a crash never leaves a torn file.
//! [`MemoryStore`] is a process-local backend for tests and ephemeral use.

use crate::ItchError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Persistence over opaque bytes.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ItchError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), ItchError>;

    /// Remove `key`. Missing keys are not an error.
    fn delete(&mut self, key: &str) -> Result<(), ItchError>;

    /// Make previous writes durable.
    fn flush(&mut self) -> Result<(), ItchError>;
}

/// File-based store, one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store under `dirs::data_dir()/<namespace>/`.
    pub fn new(namespace: &str) -> Result<Self, ItchError> {
        let base_dir = dirs::data_dir()
            .ok_or_else(|| ItchError::StorageError("Could not find data directory".to_string()))?;

        Self::with_path(base_dir.join(namespace))
    }

    /// Create a store rooted at a specific directory.
    pub fn with_path(dir: PathBuf) -> Result<Self, ItchError> {
        fs::create_dir_all(&dir)
            .map_err(|e| ItchError::StorageError(format!("Failed to create store dir: {}", e)))?;
        Ok(Self { dir })
    }

    /// Directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, ItchError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(ItchError::StorageError(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ItchError> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)
            .map_err(|e| ItchError::StorageError(format!("Failed to read {}: {}", key, e)))?;
        Ok(Some(bytes))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), ItchError> {
        let target_path = self.key_path(key)?;
        let temp_path = self.dir.join(format!(".{}.tmp", key));

        fs::write(&temp_path, value)
            .map_err(|e| ItchError::StorageError(format!("Failed to write temp file: {}", e)))?;

        fs::rename(&temp_path, &target_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ItchError::StorageError(format!("Failed to rename store file: {}", e))
        })
    }

    fn delete(&mut self, key: &str) -> Result<(), ItchError> {
        let path = self.key_path(key)?;

        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| ItchError::StorageError(format!("Failed to delete {}: {}", key, e)))?;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<(), ItchError> {
        // set() already renamed into place
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, ItchError> {
        self.entries
            .lock()
            .map_err(|_| ItchError::StorageError("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ItchError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), ItchError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), ItchError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ItchError> {
        Ok(())
    }
}
