//! Level completion and the per-task progress summary.
//!
//! Both are computed fresh from the current placements and paint every time
//! they are needed; neither is cached on the session snapshot.

#[cfg(test)]
#[path = "completion_test.rs"]
mod completion_test;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{StickerId, Task};
use crate::state::{NailColors, Placement};

/// Whether every sticker target is correctly placed and every required nail
/// carries exactly its required color.
///
/// Stickers without a target never count. A task with no sticker targets
/// only needs its paint; a task with neither is complete as soon as it exists.
#[must_use]
pub fn is_complete(task: Option<&Task>, placements: &BTreeMap<StickerId, Placement>, nail_colors: &NailColors) -> bool {
    let Some(task) = task else {
        return false;
    };
    let stickers_done = task
        .targets
        .iter()
        .all(|target| placements.get(&target.sticker_id).is_some_and(|p| p.is_correct));
    let nails_done = task
        .nail_targets
        .iter()
        .all(|(nail, color)| nail_colors.get(*nail) == color.as_str());
    stickers_done && nails_done
}

/// Counters shown alongside the board while a task is being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Sticker targets whose placement is currently marked correct.
    pub stickers_correct: usize,
    pub stickers_total: usize,
    /// Nail targets whose paint currently matches.
    pub nails_correct: usize,
    pub nails_total: usize,
}

impl Progress {
    /// Summarize how far the player is through `task`. All zeros without a task.
    #[must_use]
    pub fn of(task: Option<&Task>, placements: &BTreeMap<StickerId, Placement>, nail_colors: &NailColors) -> Self {
        let Some(task) = task else {
            return Self::default();
        };
        Self {
            stickers_correct: task
                .targets
                .iter()
                .filter(|t| placements.get(&t.sticker_id).is_some_and(|p| p.is_correct))
                .count(),
            stickers_total: task.targets.len(),
            nails_correct: task
                .nail_targets
                .iter()
                .filter(|(nail, color)| nail_colors.get(**nail) == color.as_str())
                .count(),
            nails_total: task.nail_targets.len(),
        }
    }
}
