#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// clamp
// =============================================================

#[test]
fn clamp_passes_values_inside_range() {
    assert_eq!(clamp(0.4, 0.0, 1.0), 0.4);
}

#[test]
fn clamp_pins_values_outside_range() {
    assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(1.7, 0.0, 1.0), 1.0);
}

#[test]
fn clamp_maps_nan_to_min() {
    assert_eq!(clamp(f64::NAN, 0.25, 1.0), 0.25);
}

#[test]
fn clamp_unit_handles_infinities() {
    assert_eq!(clamp_unit(f64::INFINITY), 1.0);
    assert_eq!(clamp_unit(f64::NEG_INFINITY), 0.0);
}

// =============================================================
// normalize_rotation
// =============================================================

#[test]
fn normalize_rotation_wraps_large_angles() {
    assert_eq!(normalize_rotation(370.0), 10.0);
    assert_eq!(normalize_rotation(720.0), 0.0);
}

#[test]
fn normalize_rotation_wraps_negative_angles() {
    assert_eq!(normalize_rotation(-15.0), 345.0);
    assert_eq!(normalize_rotation(-360.0), 0.0);
}

#[test]
fn normalize_rotation_never_returns_360() {
    let r = normalize_rotation(-1e-20);
    assert!((0.0..360.0).contains(&r));
}

#[test]
fn normalize_rotation_maps_non_finite_to_zero() {
    assert_eq!(normalize_rotation(f64::NAN), 0.0);
    assert_eq!(normalize_rotation(f64::INFINITY), 0.0);
}

// =============================================================
// rotation_delta_degrees
// =============================================================

#[test]
fn rotation_delta_takes_short_way_across_zero() {
    assert_eq!(rotation_delta_degrees(5.0, 350.0), 15.0);
    assert_eq!(rotation_delta_degrees(350.0, 5.0), 15.0);
}

#[test]
fn rotation_delta_is_symmetric() {
    for (a, b) in [(10.0, 80.0), (200.0, 20.0), (359.0, 1.0), (90.0, 270.0)] {
        assert_eq!(rotation_delta_degrees(a, b), rotation_delta_degrees(b, a));
    }
}

#[test]
fn rotation_delta_caps_at_180() {
    assert_eq!(rotation_delta_degrees(0.0, 180.0), 180.0);
    assert_eq!(rotation_delta_degrees(0.0, 181.0), 179.0);
}

#[test]
fn rotation_delta_of_equal_angles_is_zero() {
    assert_eq!(rotation_delta_degrees(42.0, 402.0), 0.0);
}

// =============================================================
// sanitize_scale
// =============================================================

#[test]
fn sanitize_scale_keeps_positive_values() {
    assert_eq!(sanitize_scale(1.2, 0.5), 1.2);
}

#[test]
fn sanitize_scale_falls_back_for_bad_values() {
    assert_eq!(sanitize_scale(0.0, 0.5), 0.5);
    assert_eq!(sanitize_scale(-1.0, 0.5), 0.5);
    assert_eq!(sanitize_scale(f64::NAN, 0.5), 0.5);
}

#[test]
fn sanitize_scale_uses_default_when_fallback_is_bad_too() {
    assert_eq!(sanitize_scale(f64::NAN, 0.0), DEFAULT_STICKER_SCALE);
}
