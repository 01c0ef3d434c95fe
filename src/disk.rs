//! Directory-backed persistence bridge: one JSON file per slot.
//!
//! Writes go to a sibling `.tmp` file and are renamed into place, so a crash
//! mid-write leaves the previous blob intact.

#[cfg(test)]
#[path = "disk_test.rs"]
mod disk_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use salon::storage::{StorageBridge, StorageError};

pub struct DiskStorage {
    dir: PathBuf,
}

impl DiskStorage {
    /// Use `dir` for slot files, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::Backend(format!("invalid slot name `{key}`")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn backend(err: io::Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

impl StorageBridge for DiskStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)?) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend(e)),
        }
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(backend)?;
        fs::rename(&tmp, &path).map_err(backend)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(backend(e)),
        }
    }
}
