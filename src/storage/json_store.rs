//! File-backed key-value store
//!
//! Keeps one `<key>.json` file per storage key under a data directory.
//! Writes are atomic (temp file + fsync + rename).

use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_string, write_string_atomic};
use super::KeyValueStore;

/// A [`KeyValueStore`] backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open<P: Into<PathBuf>>(dir: P) -> LedgerResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    /// The directory this store keeps its files in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        read_string(self.file_for(key))
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        write_string_atomic(self.file_for(key), value)
    }

    fn remove(&self, key: &str) -> LedgerResult<()> {
        let path = self.file_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                LedgerError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}
