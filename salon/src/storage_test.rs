use super::*;
use crate::catalog::NailName;
use crate::catalog::test_helpers::catalog_of;
use crate::state::{Placement, TaskStats, UiFlags};

/// Backend that rejects every call.
struct BrokenStorage;

impl StorageBridge for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Backend("disk on fire".into()))
    }

    fn set(&mut self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("read-only".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("read-only".into()))
    }
}

fn with_slot(key: &str, blob: &str) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    storage.set(key, blob).unwrap();
    storage
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_round_trips_and_removes() {
    let mut storage = MemoryStorage::new();
    assert_eq!(storage.get("k").unwrap(), None);
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    storage.remove("k").unwrap();
    storage.remove("k").unwrap();
    assert_eq!(storage.peek("k"), None);
}

// =============================================================
// Queue
// =============================================================

#[test]
fn queue_defaults_to_catalog_order() {
    let catalog = catalog_of(&["a", "b", "c"]);
    assert_eq!(load_queue(&MemoryStorage::new(), &catalog), catalog.ids());
}

#[test]
fn queue_drops_unknown_ids() {
    let catalog = catalog_of(&["a", "b", "c"]);
    let storage = with_slot(QUEUE_SLOT, r#"["c","gone","a"]"#);
    assert_eq!(load_queue(&storage, &catalog), vec!["c".to_owned(), "a".to_owned()]);
}

#[test]
fn queue_of_only_unknown_ids_falls_back() {
    let catalog = catalog_of(&["a", "b"]);
    let storage = with_slot(QUEUE_SLOT, r#"["x","y"]"#);
    assert_eq!(load_queue(&storage, &catalog), catalog.ids());
}

#[test]
fn malformed_queue_falls_back() {
    let catalog = catalog_of(&["a", "b"]);
    for blob in ["not json", r#"{"a":1}"#, "[1,2]"] {
        let storage = with_slot(QUEUE_SLOT, blob);
        assert_eq!(load_queue(&storage, &catalog), catalog.ids(), "blob: {blob}");
    }
}

#[test]
fn unreadable_backend_falls_back() {
    let catalog = catalog_of(&["a"]);
    assert_eq!(load_queue(&BrokenStorage, &catalog), catalog.ids());
    assert!(load_stats(&BrokenStorage).is_empty());
    assert!(load_snapshot(&BrokenStorage, &catalog).is_none());
}

// =============================================================
// Stats
// =============================================================

#[test]
fn stats_load_camel_case_records() {
    let storage = with_slot(STATS_SLOT, r#"{"a":{"attempts":3,"bestTime":9000,"completed":true}}"#);
    let stats = load_stats(&storage);
    assert_eq!(
        stats["a"],
        TaskStats { attempts: 3, best_time: Some(9_000), completed: true, completed_at: None, last_time_ms: None }
    );
}

#[test]
fn malformed_stats_fall_back_to_empty() {
    let storage = with_slot(STATS_SLOT, r#"{"a":{"attempts":"many"}}"#);
    assert!(load_stats(&storage).is_empty());
}

#[test]
fn saved_stats_load_back() {
    let mut storage = MemoryStorage::new();
    let mut stats = StatsMap::new();
    stats.insert("a".into(), TaskStats { attempts: 2, best_time: Some(500), ..TaskStats::default() });
    save_stats(&mut storage, &stats).unwrap();
    assert_eq!(load_stats(&storage), stats);
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_restores_board_but_not_ui() {
    let catalog = catalog_of(&["a", "b"]);
    let mut state = SessionState::new(&catalog, catalog.ids(), StatsMap::new());
    state.current_task_id = Some("b".into());
    state.elapsed_ms = 7_500;
    state.placements.insert("b-star".into(), Placement::new(Some(NailName::Index), 0.4, 0.6, 30.0, 0.9));
    state.ui.show_hints = true;
    state.ui.show_completion_modal = true;

    let mut storage = MemoryStorage::new();
    save_snapshot(&mut storage, &state).unwrap();
    let restored = load_snapshot(&storage, &catalog).unwrap();

    assert_eq!(restored.current_task_id.as_deref(), Some("b"));
    assert_eq!(restored.elapsed_ms, 7_500);
    assert_eq!(restored.placements, state.placements);
    assert_eq!(restored.ui, UiFlags::default());
}

#[test]
fn snapshot_with_unknown_task_is_discarded() {
    let catalog = catalog_of(&["a"]);
    let mut state = SessionState::new(&catalog, catalog.ids(), StatsMap::new());
    state.current_task_id = Some("retired".into());
    let mut storage = MemoryStorage::new();
    save_snapshot(&mut storage, &state).unwrap();
    assert!(load_snapshot(&storage, &catalog).is_none());
}

#[test]
fn snapshot_without_current_task_is_kept() {
    let catalog = catalog_of(&["a"]);
    let mut state = SessionState::new(&catalog, catalog.ids(), StatsMap::new());
    state.current_task_id = None;
    let mut storage = MemoryStorage::new();
    save_snapshot(&mut storage, &state).unwrap();
    assert_eq!(load_snapshot(&storage, &catalog).unwrap().current_task_id, None);
}

#[test]
fn malformed_snapshot_is_discarded() {
    let catalog = catalog_of(&["a"]);
    let storage = with_slot(SESSION_SLOT, r#"{"currentTaskId":"a"}"#);
    assert!(load_snapshot(&storage, &catalog).is_none());
}

#[test]
fn clear_snapshot_keeps_other_slots() {
    let catalog = catalog_of(&["a"]);
    let state = SessionState::new(&catalog, catalog.ids(), StatsMap::new());
    let mut storage = MemoryStorage::new();
    save_queue(&mut storage, &state.queue).unwrap();
    save_snapshot(&mut storage, &state).unwrap();
    clear_snapshot(&mut storage).unwrap();
    assert!(storage.peek(SESSION_SLOT).is_none());
    assert_eq!(storage.peek(QUEUE_SLOT), Some(r#"["a"]"#));
}

// =============================================================
// Save errors
// =============================================================

#[test]
fn save_surfaces_backend_errors() {
    let err = save_queue(&mut BrokenStorage, &["a".to_owned()]).unwrap_err();
    assert!(matches!(err, StorageError::Backend(_)));
    assert_eq!(err.to_string(), "storage backend failed: read-only");
}
