//! Per-sticker correctness: does a placement match its target within tolerance?
//!
//! Pure function of its inputs. It fails closed: no target or no placement
//! means incorrect. The nail is checked first and a mismatch short-circuits
//! the geometric comparison.

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod evaluate_test;

use crate::catalog::Task;
use crate::consts::TOLERANCE_EPSILON;
use crate::geometry::rotation_delta_degrees;
use crate::state::Placement;

/// Outcome of evaluating one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
}

impl Evaluation {
    const INCORRECT: Self = Self { is_correct: false };
}

/// Evaluate `placement` of `sticker_id` against the target `task` defines.
#[must_use]
pub fn evaluate(task: Option<&Task>, sticker_id: &str, placement: Option<&Placement>) -> Evaluation {
    let Some(target) = task.and_then(|t| t.target_for(sticker_id)) else {
        return Evaluation::INCORRECT;
    };
    let Some(placement) = placement else {
        return Evaluation::INCORRECT;
    };
    if placement.nail_id != Some(target.nail_name) {
        return Evaluation::INCORRECT;
    }

    let placed = placement.transform();
    let goal = &target.target_transform;
    let tol = &target.tolerance;
    let dx = (placed.x - goal.x).abs();
    let dy = (placed.y - goal.y).abs();
    let drot = rotation_delta_degrees(placed.rotation, goal.rotation);
    let dscale = (placed.scale - goal.scale).abs();

    let is_correct = within(dx, tol.x())
        && within(dy, tol.y())
        && within(drot, tol.rotation())
        && within(dscale, tol.scale());
    Evaluation { is_correct }
}

/// Inclusive threshold check. `NaN` deltas never pass.
fn within(delta: f64, tolerance: f64) -> bool {
    delta <= tolerance + TOLERANCE_EPSILON
}
