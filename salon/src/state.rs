//! Session snapshot: placements, nail paint, UI toggles, timer, queue, stats.
//!
//! `SessionState` is a plain value. Transitions in [`crate::machine`] take one
//! snapshot and return the next; nothing here mutates behind the caller's back.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, NailName, StickerId, TaskId, Transform};
use crate::consts::{NATURAL_NAIL_COLOR, PALETTE};
use crate::geometry::{clamp_unit, normalize_rotation, sanitize_scale};

// =============================================================================
// PLACEMENT
// =============================================================================

/// A sticker that has been put on the board.
///
/// `is_correct` is a cached verdict, not an input. Every write of nail,
/// position, rotation, or scale goes through [`Placement::new`], which clears
/// it; only `FinalizePlacement` (or `ShowSolution`) sets it again. Never read
/// it between a `PlaceSticker` and the following `FinalizePlacement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Nail the sticker sits on, or `None` if it was dropped off every nail.
    pub nail_id: Option<NailName>,
    /// Horizontal position, clamped to `[0, 1]`.
    pub x: f64,
    /// Vertical position, clamped to `[0, 1]`.
    pub y: f64,
    /// Rotation in degrees, normalized to `[0, 360)`.
    pub rotation: f64,
    /// Positive scale factor.
    pub scale: f64,
    /// Cached correctness verdict.
    #[serde(default)]
    pub is_correct: bool,
}

impl Placement {
    /// Build a placement with every field normalized and the verdict cleared.
    #[must_use]
    pub fn new(nail_id: Option<NailName>, x: f64, y: f64, rotation: f64, scale: f64) -> Self {
        Self {
            nail_id,
            x: clamp_unit(x),
            y: clamp_unit(y),
            rotation: normalize_rotation(rotation),
            scale: sanitize_scale(scale, 1.0),
            is_correct: false,
        }
    }

    /// The exact solved placement for a target transform on `nail`.
    #[must_use]
    pub fn solved(nail: NailName, transform: &Transform) -> Self {
        let Transform { x, y, rotation, scale } = *transform;
        Self { is_correct: true, ..Self::new(Some(nail), x, y, rotation, scale) }
    }

    /// The transform part of this placement.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform { x: self.x, y: self.y, rotation: self.rotation, scale: self.scale }
    }
}

// =============================================================================
// NAIL COLORS
// =============================================================================

/// Current paint on each of the five nails. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NailColors {
    #[serde(default = "natural")]
    pub thumb: String,
    #[serde(default = "natural")]
    pub index: String,
    #[serde(default = "natural")]
    pub middle: String,
    #[serde(default = "natural")]
    pub ring: String,
    #[serde(default = "natural")]
    pub pinky: String,
}

fn natural() -> String {
    NATURAL_NAIL_COLOR.to_owned()
}

impl Default for NailColors {
    fn default() -> Self {
        Self { thumb: natural(), index: natural(), middle: natural(), ring: natural(), pinky: natural() }
    }
}

impl NailColors {
    /// Paint currently on `nail`.
    #[must_use]
    pub fn get(&self, nail: NailName) -> &str {
        match nail {
            NailName::Thumb => &self.thumb,
            NailName::Index => &self.index,
            NailName::Middle => &self.middle,
            NailName::Ring => &self.ring,
            NailName::Pinky => &self.pinky,
        }
    }

    /// Replace the paint on `nail`.
    pub fn set(&mut self, nail: NailName, color: impl Into<String>) {
        let slot = match nail {
            NailName::Thumb => &mut self.thumb,
            NailName::Index => &mut self.index,
            NailName::Middle => &mut self.middle,
            NailName::Ring => &mut self.ring,
            NailName::Pinky => &mut self.pinky,
        };
        *slot = color.into();
    }
}

// =============================================================================
// UI FLAGS / STATUS
// =============================================================================

/// Session-local view toggles. Not gameplay truth and never restored from a
/// persisted snapshot.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFlags {
    pub show_hints: bool,
    pub show_template: bool,
    /// Correct stickers ignore nudges while set.
    pub lock_correct: bool,
    pub show_stats: bool,
    pub show_completion_modal: bool,
    pub show_solution_modal: bool,
}

/// Advisory marker for host behavior. Correctness logic never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Idle,
    TaskSelected,
    Editing,
    Restarted,
    /// Set by `ShowSolution`; suppresses the completion auto-trigger.
    Solved,
}

// =============================================================================
// STATS
// =============================================================================

/// Aggregate play record for one task. A missing record equals the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    #[serde(default)]
    pub attempts: u32,
    /// Lowest completion time seen, in milliseconds. Only ever decreases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<u64>,
    #[serde(default)]
    pub completed: bool,
    /// Milliseconds since the Unix epoch of the recorded completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
    /// Most recently reported completion time, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_time_ms: Option<u64>,
}

/// Per-task statistics keyed by task id.
pub type StatsMap = BTreeMap<TaskId, TaskStats>;

// =============================================================================
// SESSION STATE
// =============================================================================

/// The full snapshot held between transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_task_id: Option<TaskId>,
    /// Placed stickers only; a missing key means the sticker is in the palette.
    #[serde(default)]
    pub placements: BTreeMap<StickerId, Placement>,
    #[serde(default)]
    pub nail_colors: NailColors,
    pub selected_color: String,
    pub selected_color_name: String,
    #[serde(skip)]
    pub ui: UiFlags,
    #[serde(default)]
    pub status: Status,
    pub timer_running: bool,
    #[serde(default)]
    pub elapsed_ms: u64,
    /// Remaining play order. Non-empty in steady state.
    #[serde(default)]
    pub queue: Vec<TaskId>,
    #[serde(default)]
    pub stats: StatsMap,
}

impl SessionState {
    /// Fresh state on the first catalog task with the given progress.
    #[must_use]
    pub fn new(catalog: &Catalog, queue: Vec<TaskId>, stats: StatsMap) -> Self {
        let (selected_color, selected_color_name) = default_selected_color();
        Self {
            current_task_id: catalog.first().map(|t| t.id.clone()),
            placements: BTreeMap::new(),
            nail_colors: NailColors::default(),
            selected_color,
            selected_color_name,
            ui: UiFlags::default(),
            status: Status::Idle,
            timer_running: true,
            elapsed_ms: 0,
            queue,
            stats,
        }
    }

    /// Stats for `task_id`, or the zero record when none exists yet.
    #[must_use]
    pub fn stats_for(&self, task_id: &str) -> TaskStats {
        self.stats.get(task_id).copied().unwrap_or_default()
    }

    /// Clear the board for a new attempt: placements, paint, toggles, and
    /// timer. Queue, stats, and the current task are left alone.
    pub(crate) fn reset_board(&mut self) {
        let (selected_color, selected_color_name) = default_selected_color();
        self.placements.clear();
        self.nail_colors = NailColors::default();
        self.selected_color = selected_color;
        self.selected_color_name = selected_color_name;
        self.ui = UiFlags::default();
        self.timer_running = true;
        self.elapsed_ms = 0;
    }
}

fn default_selected_color() -> (String, String) {
    PALETTE.first().map_or_else(
        || (NATURAL_NAIL_COLOR.to_owned(), String::new()),
        |c| (c.value.to_owned(), c.name.to_owned()),
    )
}
