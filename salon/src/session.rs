//! Host-side controller that owns the catalog, the state, and the bridge.
//!
//! DESIGN
//! ======
//! [`crate::machine::apply`] is a pure transition. Everything a host must do
//! around it lives here, so every host gets it the same way:
//!
//! - After a board-changing event, check completion. On a false-to-true edge
//!   for a task not yet marked completed (and not just revealed by
//!   `ShowSolution`), record the completion and open the completion modal.
//! - After every event, write the slots that changed. Write failures are
//!   logged and dropped; in-memory state is never rolled back.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Task, TaskId};
use crate::completion::{Progress, is_complete};
use crate::evaluate::evaluate;
use crate::event::{Event, StatsUpdate};
use crate::machine::{apply, current_task};
use crate::progress::{LevelView, is_level_locked, level_views};
use crate::state::{Placement, SessionState, Status, UiFlags};
use crate::storage::{
    StorageBridge, StorageError, clear_snapshot, load_queue, load_snapshot, load_stats, save_queue, save_snapshot,
    save_stats,
};

/// Something a host may want to react to after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Outcome {
    /// The current task changed (or was cleared).
    TaskChanged { task_id: Option<TaskId> },
    /// The current task was just completed and its stats recorded.
    LevelCompleted { task_id: TaskId, time_ms: u64 },
}

/// What a host renders after each dispatch.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub outcomes: Vec<Outcome>,
    pub state: &'a SessionState,
    pub ui: UiFlags,
    pub progress: Progress,
}

/// A running game session.
pub struct Session<S: StorageBridge> {
    catalog: Catalog,
    state: SessionState,
    storage: S,
}

impl<S: StorageBridge> Session<S> {
    /// Start from persisted progress, resuming the stored snapshot if usable.
    pub fn hydrate(catalog: Catalog, storage: S) -> Self {
        Self::load(catalog, storage, true)
    }

    /// Start from persisted queue and stats. Any stored snapshot is deleted.
    pub fn fresh(catalog: Catalog, mut storage: S) -> Self {
        if let Err(e) = clear_snapshot(&mut storage) {
            warn!(error = %e, "failed to clear stored session");
        }
        Self::load(catalog, storage, false)
    }

    fn load(catalog: Catalog, storage: S, resume: bool) -> Self {
        let queue = load_queue(&storage, &catalog);
        let stats = load_stats(&storage);
        let snapshot = if resume { load_snapshot(&storage, &catalog) } else { None };
        let state = match snapshot {
            Some(snapshot) => {
                info!(task_id = ?snapshot.current_task_id, "resuming stored session");
                let mut state = SessionState { queue, stats, ui: UiFlags::default(), ..snapshot };
                recheck_placements(&catalog, &mut state);
                state
            }
            None => SessionState::new(&catalog, queue, stats),
        };
        Self { catalog, state, storage }
    }

    /// Apply `event`, run the completion check, and persist what changed.
    ///
    /// `now_ms` is wall-clock time in milliseconds since the Unix epoch; it is
    /// only used as the `completedAt` stamp.
    pub fn dispatch(&mut self, event: Event, now_ms: u64) -> Vec<Outcome> {
        let kind = event.kind();
        let checks_completion = event.affects_board();
        let was_complete = self.is_complete();
        let previous_task = self.state.current_task_id.clone();

        let next = apply(&self.catalog, &self.state, event);
        let previous = std::mem::replace(&mut self.state, next);

        let mut outcomes = Vec::new();
        let task_changed = self.state.current_task_id != previous_task;
        if task_changed {
            outcomes.push(Outcome::TaskChanged { task_id: self.state.current_task_id.clone() });
        }
        if checks_completion {
            if let Some(done) = self.auto_complete(was_complete && !task_changed, now_ms) {
                outcomes.push(done);
            }
        }

        self.autosave(&previous);
        debug!(event = kind, task_id = ?self.state.current_task_id, status = ?self.state.status, "dispatched");
        outcomes
    }

    fn auto_complete(&mut self, was_complete: bool, now_ms: u64) -> Option<Outcome> {
        if was_complete || self.state.status == Status::Solved {
            return None;
        }
        let task_id = self.current_task()?.id.clone();
        if self.state.stats_for(&task_id).completed || !self.is_complete() {
            return None;
        }

        let time_ms = self.state.elapsed_ms;
        let update = StatsUpdate {
            completed: Some(true),
            completed_at: Some(now_ms),
            time_ms: Some(time_ms),
            ..StatsUpdate::default()
        };
        let recorded = apply(&self.catalog, &self.state, Event::RecordStats { task_id: task_id.clone(), update });
        self.state = apply(&self.catalog, &recorded, Event::ShowCompletionModal);

        info!(task_id = %task_id, time_ms, "level completed");
        Some(Outcome::LevelCompleted { task_id, time_ms })
    }

    fn autosave(&mut self, previous: &SessionState) {
        if self.state.queue != previous.queue {
            log_save("queue", save_queue(&mut self.storage, &self.state.queue));
        }
        if self.state.stats != previous.stats {
            log_save("stats", save_stats(&mut self.storage, &self.state.stats));
        }
        if self.state != *previous {
            log_save("snapshot", save_snapshot(&mut self.storage, &self.state));
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The task being played, if the current id resolves.
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        current_task(&self.catalog, &self.state)
    }

    /// Whether the current task is complete right now.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        is_complete(self.current_task(), &self.state.placements, &self.state.nail_colors)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::of(self.current_task(), &self.state.placements, &self.state.nail_colors)
    }

    /// The level picker, in catalog order.
    #[must_use]
    pub fn levels(&self) -> Vec<LevelView> {
        level_views(&self.catalog, &self.state.stats, self.state.current_task_id.as_deref())
    }

    #[must_use]
    pub fn is_level_locked(&self, index: usize) -> bool {
        is_level_locked(&self.catalog, &self.state.stats, index)
    }

    /// Bundle `outcomes` with the current state for rendering.
    #[must_use]
    pub fn report(&self, outcomes: Vec<Outcome>) -> Report<'_> {
        Report { outcomes, state: &self.state, ui: self.state.ui, progress: self.progress() }
    }
}

/// Rebuild restored placements through [`Placement::new`] and recompute each
/// verdict against the current catalog. Stickers the current task does not
/// define go back to the palette.
fn recheck_placements(catalog: &Catalog, state: &mut SessionState) {
    let task = current_task(catalog, state);
    let restored = std::mem::take(&mut state.placements);
    let stored_count = restored.len();
    state.placements = restored
        .into_iter()
        .filter_map(|(sticker_id, stored)| {
            let task = task?;
            if task.sticker(&sticker_id).is_none() {
                return None;
            }
            let mut placement = Placement::new(stored.nail_id, stored.x, stored.y, stored.rotation, stored.scale);
            placement.is_correct = evaluate(Some(task), &sticker_id, Some(&placement)).is_correct;
            Some((sticker_id, placement))
        })
        .collect();
    if state.placements.len() != stored_count {
        debug!(dropped = stored_count - state.placements.len(), "restored placements not in current task");
    }
}

fn log_save(slot: &'static str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        warn!(slot, error = %e, "autosave failed");
    }
}
