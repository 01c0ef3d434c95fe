//! Level queue, statistics merge, and level locking.
//!
//! The queue is the remaining play order. It heals itself: whenever it would
//! run dry it is refilled from catalog order, so it is never empty after an
//! advance. Stats records are created lazily and `best_time` only improves.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Catalog, TaskId};
use crate::event::StatsUpdate;
use crate::state::{StatsMap, TaskStats};

// =============================================================================
// QUEUE
// =============================================================================

/// Keep only ids the catalog knows, dropping repeats. An empty result falls
/// back to full catalog order.
#[must_use]
pub fn sanitize_queue(ids: &[TaskId], catalog: &Catalog) -> Vec<TaskId> {
    let mut seen = HashSet::new();
    let kept: Vec<TaskId> = ids
        .iter()
        .filter(|id| catalog.contains(id) && seen.insert(id.as_str()))
        .cloned()
        .collect();
    if kept.is_empty() { catalog.ids() } else { kept }
}

/// Pop the head of `queue`, refilling from catalog order if that empties it.
#[must_use]
pub fn advance_queue(queue: &[TaskId], catalog: &Catalog) -> Vec<TaskId> {
    let rest = queue.get(1..).unwrap_or_default();
    if rest.is_empty() { catalog.ids() } else { rest.to_vec() }
}

/// The task to play next for `queue`: its head, or the first catalog task
/// when the queue is empty. `None` when the head is not in the catalog.
#[must_use]
pub fn next_task_id(queue: &[TaskId], catalog: &Catalog) -> Option<TaskId> {
    match queue.first() {
        Some(id) => catalog.get(id).map(|t| t.id.clone()),
        None => catalog.first().map(|t| t.id.clone()),
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Count one more attempt for `task_id`, creating its record if needed.
pub fn record_attempt(stats: &mut StatsMap, task_id: &str) {
    let entry = stats.entry(task_id.to_owned()).or_default();
    entry.attempts = entry.attempts.saturating_add(1);
}

/// Merge `update` into the record for `task_id`.
///
/// Present fields overwrite; `best_time` moves only when the reported time is
/// strictly lower than the stored one (or none is stored yet).
pub fn merge_stats(stats: &mut StatsMap, task_id: &str, update: StatsUpdate) {
    let entry = stats.entry(task_id.to_owned()).or_default();
    if let Some(attempts) = update.attempts {
        entry.attempts = attempts;
    }
    if let Some(completed) = update.completed {
        entry.completed = completed;
    }
    if let Some(at) = update.completed_at {
        entry.completed_at = Some(at);
    }
    if let Some(time_ms) = update.time_ms {
        entry.last_time_ms = Some(time_ms);
        if entry.best_time.is_none_or(|best| time_ms < best) {
            entry.best_time = Some(time_ms);
        }
    }
}

// =============================================================================
// LEVEL LOCKING
// =============================================================================

/// Level `index` is playable only once the level before it is completed.
/// Level 0 is always open; indices past the catalog are locked.
#[must_use]
pub fn is_level_locked(catalog: &Catalog, stats: &StatsMap, index: usize) -> bool {
    if index >= catalog.len() {
        return true;
    }
    let Some(prev_index) = index.checked_sub(1) else {
        return false;
    };
    catalog
        .iter()
        .nth(prev_index)
        .is_none_or(|prev| !stats.get(&prev.id).is_some_and(|s| s.completed))
}

/// One entry of the level picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelView {
    pub index: usize,
    pub id: TaskId,
    pub title: String,
    pub difficulty: String,
    pub locked: bool,
    pub completed: bool,
    pub active: bool,
    pub stats: TaskStats,
}

/// Every level in catalog order with its derived flags.
#[must_use]
pub fn level_views(catalog: &Catalog, stats: &StatsMap, current: Option<&str>) -> Vec<LevelView> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let record = stats.get(&task.id).copied().unwrap_or_default();
            LevelView {
                index,
                id: task.id.clone(),
                title: task.title.clone(),
                difficulty: task.difficulty.clone(),
                locked: is_level_locked(catalog, stats, index),
                completed: record.completed,
                active: current == Some(task.id.as_str()),
                stats: record,
            }
        })
        .collect()
}
