//! Numeric helpers for board-space positions and angles.
//!
//! Board space is normalized: `(0, 0)` is the top-left of the hand artwork and
//! `(1, 1)` the bottom-right. Rotations are degrees, clockwise.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::DEFAULT_STICKER_SCALE;

/// Clamp `value` into `[min, max]`. `NaN` maps to `min`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Clamp a coordinate into normalized board space `[0, 1]`.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Wrap an angle in degrees into `[0, 360)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest angular distance between two angles, in `[0, 180]`.
#[must_use]
pub fn rotation_delta_degrees(a: f64, b: f64) -> f64 {
    let diff = normalize_rotation(a - b);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Accept a scale only if it is a positive finite number; otherwise use
/// `fallback`, and if that is also unusable, the default sticker scale.
#[must_use]
pub fn sanitize_scale(scale: f64, fallback: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else if fallback.is_finite() && fallback > 0.0 {
        fallback
    } else {
        DEFAULT_STICKER_SCALE
    }
}
