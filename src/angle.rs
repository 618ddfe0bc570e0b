//! Angle utilities used by region growing and validation.
//!
//! Level-line angles are signed and live in `(−π, π]`; the orientation of a
//! level line matters, so nothing here folds modulo π.
use std::f64::consts::PI;

/// Wraps an angle into `(−π, π]`.
#[inline]
pub fn normalize_signed_pi(angle: f64) -> f64 {
    let mut norm = angle.rem_euclid(2.0 * PI);
    if norm > PI {
        norm -= 2.0 * PI;
    }
    norm
}

/// Signed difference `a − b` wrapped into `(−π, π]`.
#[inline]
pub fn signed_angle_diff(a: f64, b: f64) -> f64 {
    normalize_signed_pi(a - b)
}

/// Absolute wrapped difference, in `[0, π]`.
#[inline]
pub fn abs_angle_diff(a: f64, b: f64) -> f64 {
    signed_angle_diff(a, b).abs()
}

/// True when `angle` is defined and within `tolerance` of `reference`.
#[inline]
pub fn is_aligned(angle: Option<f64>, reference: f64, tolerance: f64) -> bool {
    match angle {
        Some(a) => abs_angle_diff(a, reference) <= tolerance,
        None => false,
    }
}
