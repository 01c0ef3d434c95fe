//! Persistence bridge and slot helpers.
//!
//! The host supplies a key-value store through [`StorageBridge`]. The core
//! only ever touches three slots ([`QUEUE_SLOT`], [`STATS_SLOT`],
//! [`SESSION_SLOT`]) and stores JSON blobs in them.
//!
//! Loading never fails. A missing, unreadable, or malformed blob falls back
//! to its default (catalog order, empty stats, no snapshot) and the problem is
//! logged with `warn!`. Saving returns the error so the caller can decide
//! whether to log it.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::catalog::{Catalog, TaskId};
use crate::consts::{QUEUE_SLOT, SESSION_SLOT, STATS_SLOT};
use crate::progress::sanitize_queue;
use crate::state::{SessionState, StatsMap};

/// Error from a storage backend or from encoding a blob.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to encode blob: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend failed: {0}")]
    Backend(String),
}

// =============================================================================
// BRIDGE
// =============================================================================

/// Key-value store the host provides for persisted slots.
pub trait StorageBridge {
    /// Read the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store rejects the write.
    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store. Used by tests and by hosts that do not persist.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob under `key`, bypassing the bridge.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl StorageBridge for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

// =============================================================================
// LOAD
// =============================================================================

fn read_slot<T: DeserializeOwned>(storage: &impl StorageBridge, key: &str) -> Option<T> {
    let blob = match storage.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(e) => {
            warn!(slot = key, error = %e, "storage read failed; using default");
            return None;
        }
    };
    match serde_json::from_str(&blob) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(slot = key, error = %e, "malformed blob; using default");
            None
        }
    }
}

/// Stored play order, sanitized against `catalog`. Falls back to catalog order.
#[must_use]
pub fn load_queue(storage: &impl StorageBridge, catalog: &Catalog) -> Vec<TaskId> {
    match read_slot::<Vec<TaskId>>(storage, QUEUE_SLOT) {
        Some(ids) => sanitize_queue(&ids, catalog),
        None => catalog.ids(),
    }
}

/// Stored statistics. Falls back to an empty map.
#[must_use]
pub fn load_stats(storage: &impl StorageBridge) -> StatsMap {
    read_slot(storage, STATS_SLOT).unwrap_or_default()
}

/// Stored full-session snapshot, if present, well-formed, and pointing at a
/// task `catalog` still has. UI toggles are never part of it.
#[must_use]
pub fn load_snapshot(storage: &impl StorageBridge, catalog: &Catalog) -> Option<SessionState> {
    let snapshot: SessionState = read_slot(storage, SESSION_SLOT)?;
    if let Some(id) = &snapshot.current_task_id {
        if !catalog.contains(id) {
            warn!(task_id = %id, "snapshot references unknown task; discarding");
            return None;
        }
    }
    Some(snapshot)
}

// =============================================================================
// SAVE
// =============================================================================

fn write_slot<T>(storage: &mut impl StorageBridge, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let blob = serde_json::to_string(value)?;
    storage.set(key, &blob)
}

/// Persist the remaining play order.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the backend write fails.
pub fn save_queue(storage: &mut impl StorageBridge, queue: &[TaskId]) -> Result<(), StorageError> {
    write_slot(storage, QUEUE_SLOT, queue)
}

/// Persist per-task statistics.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the backend write fails.
pub fn save_stats(storage: &mut impl StorageBridge, stats: &StatsMap) -> Result<(), StorageError> {
    write_slot(storage, STATS_SLOT, stats)
}

/// Persist the full session snapshot.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the backend write fails.
pub fn save_snapshot(storage: &mut impl StorageBridge, state: &SessionState) -> Result<(), StorageError> {
    write_slot(storage, SESSION_SLOT, state)
}

/// Forget the full session snapshot. Queue and stats are kept.
///
/// # Errors
///
/// Returns a [`StorageError`] if the backend delete fails.
pub fn clear_snapshot(storage: &mut impl StorageBridge) -> Result<(), StorageError> {
    storage.remove(SESSION_SLOT)
}
