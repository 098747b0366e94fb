use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::error::StorageError;

/// Durable slot holding the serialized likes collection.
pub trait LikesStore: Send + Sync {
    /// Return the stored value, or `None` when nothing was ever written.
    fn read_all(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored value.
    fn write_all(&self, data: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LikesStore for FileStore {
    fn read_all(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, data: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, data)?;
        debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the value in memory only; handy for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Mutex::new(Some(data.into())),
        }
    }
}

impl LikesStore for MemoryStore {
    fn read_all(&self) -> Result<Option<String>, StorageError> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        Ok(data.clone())
    }

    fn write_all(&self, data: &str) -> Result<(), StorageError> {
        let mut slot = self.data.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(data.to_string());
        Ok(())
    }
}
