//! Transitions accepted by the task state machine.
//!
//! One variant per transition, each carrying only the fields it needs. The
//! serde form is internally tagged with camelCase fields
//! (`{"type": "paint_nail", "nailId": "index", ...}`), matching the state
//! the host gets back.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

use crate::catalog::{NailName, StickerId, TaskId};

/// Where a sticker was dropped. Rotation and scale fall back to the existing
/// placement, then to the sticker's start transform, when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPoint {
    /// Nail under the drop point, or `None` when it missed every nail.
    pub nail_id: Option<NailName>,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// Fields merged into a task's statistics. Absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
    /// Completion time candidate; only lowers `best_time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
}

/// A named transition with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Event {
    SelectTask { task_id: TaskId },
    SelectColor { value: String, name: String },
    PaintNail { nail_id: NailName, color: String },
    PlaceSticker { sticker_id: StickerId, position: DropPoint },
    FinalizePlacement { sticker_id: StickerId, task_id: TaskId },
    /// Tap-to-rotate on a placed sticker, followed by re-finalization.
    NudgeSticker { sticker_id: StickerId, task_id: TaskId },
    RemoveSticker { sticker_id: StickerId },
    Restart,
    ShowSolution,
    AdvanceLevel,
    SetQueue { queue: Vec<TaskId> },
    RecordStats { task_id: TaskId, update: StatsUpdate },
    Tick { delta_ms: u64 },
    ToggleTimer,
    ToggleHints,
    ToggleTemplate,
    ToggleLockCorrect,
    ToggleStats,
    ShowCompletionModal,
    HideCompletionModal,
    ShowSolutionModal,
    HideSolutionModal,
}

impl Event {
    /// Snake-case tag, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SelectTask { .. } => "select_task",
            Self::SelectColor { .. } => "select_color",
            Self::PaintNail { .. } => "paint_nail",
            Self::PlaceSticker { .. } => "place_sticker",
            Self::FinalizePlacement { .. } => "finalize_placement",
            Self::NudgeSticker { .. } => "nudge_sticker",
            Self::RemoveSticker { .. } => "remove_sticker",
            Self::Restart => "restart",
            Self::ShowSolution => "show_solution",
            Self::AdvanceLevel => "advance_level",
            Self::SetQueue { .. } => "set_queue",
            Self::RecordStats { .. } => "record_stats",
            Self::Tick { .. } => "tick",
            Self::ToggleTimer => "toggle_timer",
            Self::ToggleHints => "toggle_hints",
            Self::ToggleTemplate => "toggle_template",
            Self::ToggleLockCorrect => "toggle_lock_correct",
            Self::ToggleStats => "toggle_stats",
            Self::ShowCompletionModal => "show_completion_modal",
            Self::HideCompletionModal => "hide_completion_modal",
            Self::ShowSolutionModal => "show_solution_modal",
            Self::HideSolutionModal => "hide_solution_modal",
        }
    }

    /// Whether this event can change placements, paint, or the current task,
    /// and so warrants a completion check afterwards.
    #[must_use]
    pub fn affects_board(&self) -> bool {
        matches!(
            self,
            Self::SelectTask { .. }
                | Self::PaintNail { .. }
                | Self::PlaceSticker { .. }
                | Self::FinalizePlacement { .. }
                | Self::NudgeSticker { .. }
                | Self::RemoveSticker { .. }
                | Self::Restart
                | Self::ShowSolution
                | Self::AdvanceLevel
        )
    }
}
