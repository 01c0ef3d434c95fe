//! The task state machine: `apply(catalog, state, event) -> state`.
//!
//! Deterministic and synchronous. Each call clones the previous snapshot,
//! applies exactly one event, and returns the result. Events that reference
//! unknown tasks or stickers degrade to the documented fallbacks instead of
//! failing, so every well-typed event yields a valid next state.
//!
//! Completion detection and stats recording are not coupled here;
//! see [`crate::session`] for the caller-side auto-behavior.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use tracing::debug;

use crate::catalog::{Catalog, Task};
use crate::consts::{DEFAULT_STICKER_SCALE, NUDGE_ROTATION_DEG};
use crate::evaluate::evaluate;
use crate::event::{DropPoint, Event};
use crate::geometry::sanitize_scale;
use crate::progress::{advance_queue, merge_stats, next_task_id, record_attempt, sanitize_queue};
use crate::state::{Placement, SessionState, Status};

/// Apply one event to `state` and return the next snapshot.
#[must_use]
pub fn apply(catalog: &Catalog, state: &SessionState, event: Event) -> SessionState {
    let mut next = state.clone();
    match event {
        Event::SelectTask { task_id } => select_task(catalog, &mut next, &task_id),
        Event::SelectColor { value, name } => {
            next.selected_color = value;
            next.selected_color_name = name;
        }
        Event::PaintNail { nail_id, color } => next.nail_colors.set(nail_id, color),
        Event::PlaceSticker { sticker_id, position } => place_sticker(catalog, &mut next, sticker_id, position),
        Event::FinalizePlacement { sticker_id, task_id } => {
            finalize(catalog.get(&task_id), &mut next, &sticker_id);
        }
        Event::NudgeSticker { sticker_id, task_id } => nudge(catalog.get(&task_id), &mut next, &sticker_id),
        Event::RemoveSticker { sticker_id } => {
            next.placements.remove(&sticker_id);
        }
        Event::Restart => {
            next.reset_board();
            next.status = Status::Restarted;
        }
        Event::ShowSolution => show_solution(catalog, &mut next),
        Event::AdvanceLevel => advance_level(catalog, &mut next),
        Event::SetQueue { queue } => next.queue = sanitize_queue(&queue, catalog),
        Event::RecordStats { task_id, update } => merge_stats(&mut next.stats, &task_id, update),
        Event::Tick { delta_ms } => {
            if next.timer_running {
                next.elapsed_ms = next.elapsed_ms.saturating_add(delta_ms);
            }
        }
        Event::ToggleTimer => next.timer_running = !next.timer_running,
        Event::ToggleHints => next.ui.show_hints = !next.ui.show_hints,
        Event::ToggleTemplate => next.ui.show_template = !next.ui.show_template,
        Event::ToggleLockCorrect => next.ui.lock_correct = !next.ui.lock_correct,
        Event::ToggleStats => next.ui.show_stats = !next.ui.show_stats,
        Event::ShowCompletionModal => {
            next.ui.show_completion_modal = true;
            next.timer_running = false;
        }
        Event::HideCompletionModal => next.ui.show_completion_modal = false,
        Event::ShowSolutionModal => next.ui.show_solution_modal = true,
        Event::HideSolutionModal => next.ui.show_solution_modal = false,
    }
    next
}

/// The task `state` is currently on, if it resolves in `catalog`.
#[must_use]
pub fn current_task<'a>(catalog: &'a Catalog, state: &SessionState) -> Option<&'a Task> {
    state.current_task_id.as_deref().and_then(|id| catalog.get(id))
}

fn select_task(catalog: &Catalog, state: &mut SessionState, requested: &str) {
    let resolved = catalog.get(requested).map(|t| t.id.clone());
    match &resolved {
        Some(id) => record_attempt(&mut state.stats, id),
        None => debug!(task_id = requested, "select_task: unknown task, clearing current task"),
    }
    state.current_task_id = resolved;
    state.reset_board();
    state.status = Status::TaskSelected;
}

fn advance_level(catalog: &Catalog, state: &mut SessionState) {
    state.queue = advance_queue(&state.queue, catalog);
    state.current_task_id = next_task_id(&state.queue, catalog);
    if state.current_task_id.is_none() {
        debug!(head = ?state.queue.first(), "advance_level: queue head not in catalog");
    }
    state.reset_board();
    state.status = Status::TaskSelected;
}

/// Upsert a placement. Missing rotation/scale come from the existing
/// placement, then the sticker's start transform. The verdict is cleared.
fn place_sticker(catalog: &Catalog, state: &mut SessionState, sticker_id: String, drop: DropPoint) {
    let start = current_task(catalog, state)
        .and_then(|task| task.sticker(&sticker_id))
        .map(|s| s.start_transform);
    let existing = state.placements.get(&sticker_id);

    let rotation = drop
        .rotation
        .or_else(|| existing.map(|p| p.rotation))
        .or_else(|| start.map(|t| t.rotation))
        .unwrap_or(0.0);
    let fallback_scale = existing
        .map(|p| p.scale)
        .or_else(|| start.map(|t| t.scale))
        .unwrap_or(DEFAULT_STICKER_SCALE);
    let scale = sanitize_scale(drop.scale.unwrap_or(fallback_scale), fallback_scale);

    let placement = Placement::new(drop.nail_id, drop.x, drop.y, rotation, scale);
    state.placements.insert(sticker_id, placement);
    state.status = Status::Editing;
}

/// Recompute the cached verdict for an existing placement. No-op when the
/// sticker is not placed.
fn finalize(task: Option<&Task>, state: &mut SessionState, sticker_id: &str) {
    let Some(placement) = state.placements.get_mut(sticker_id) else {
        return;
    };
    placement.is_correct = evaluate(task, sticker_id, Some(&*placement)).is_correct;
}

fn nudge(task: Option<&Task>, state: &mut SessionState, sticker_id: &str) {
    let lock_correct = state.ui.lock_correct;
    let Some(placement) = state.placements.get(sticker_id) else {
        return;
    };
    if lock_correct && placement.is_correct {
        return;
    }
    let rotated = Placement::new(
        placement.nail_id,
        placement.x,
        placement.y,
        placement.rotation + NUDGE_ROTATION_DEG,
        placement.scale,
    );
    state.placements.insert(sticker_id.to_owned(), rotated);
    finalize(task, state, sticker_id);
    state.status = Status::Editing;
}

/// Put every targeted sticker exactly on its target and paint every required
/// nail. Decorative placements are dropped. No-op without a current task.
fn show_solution(catalog: &Catalog, state: &mut SessionState) {
    let Some(task) = current_task(catalog, state) else {
        debug!("show_solution: no current task");
        return;
    };
    state.placements = task
        .targets
        .iter()
        .map(|t| (t.sticker_id.clone(), Placement::solved(t.nail_name, &t.target_transform)))
        .collect();
    for (nail, color) in &task.nail_targets {
        state.nail_colors.set(*nail, color.clone());
    }
    state.status = Status::Solved;
}
