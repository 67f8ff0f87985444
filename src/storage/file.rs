//! File-backed storage: one JSON file per slot under the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::{StorageAdapter, StorageError};

/// Stores each slot as `<dir>/<key>.json`.
///
/// Writes go through a temp file + rename so a crash mid-write never
/// leaves a half-written slot behind.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            slot: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Open storage at the default application data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(crate::config::storage_dir())
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageAdapter for FileStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                slot: key.to_string(),
                source,
            }),
        }
    }

    fn write_slot(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, payload).map_err(|source| StorageError::Io {
            slot: key.to_string(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            slot: key.to_string(),
            source,
        })?;
        tracing::debug!(slot = key, bytes = payload.len(), "Wrote storage slot");
        Ok(())
    }
}
