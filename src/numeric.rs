//! Float comparison and small geometric helpers.

/// Relative-error factor applied on top of machine epsilon.
const RELATIVE_ERROR_FACTOR: f64 = 100.0;

/// Compares two floats by relative error.
///
/// Values below the smallest normalised `f64` share its quantisation step,
/// so the relative error is measured against `f64::MIN_POSITIVE` there
/// instead of dividing by a near-zero magnitude.
pub fn equal_within_error(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    let max_abs = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    diff / max_abs <= RELATIVE_ERROR_FACTOR * f64::EPSILON
}

/// Looser comparison used where a documented approximation error applies:
/// relative to `max(|a|, |b|, 1)` so values near zero compare absolutely.
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tolerance * scale
}

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn dist(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_within_error_is_reflexive_and_symmetric() {
        let samples = [0.0, 1.0, -3.5, 1e-300, 1e300, 0.1 + 0.2, 0.3];
        for &a in &samples {
            assert!(equal_within_error(a, a));
            for &b in &samples {
                assert_eq!(equal_within_error(a, b), equal_within_error(b, a));
            }
        }
        assert!(equal_within_error(0.1 + 0.2, 0.3));
        assert!(!equal_within_error(1.0, 1.0 + 1e-10));
    }

    #[test]
    fn subnormal_values_compare_on_absolute_scale() {
        let smallest = f64::from_bits(1);
        let next = f64::from_bits(2);
        // Purely relative comparison would call these 50% apart.
        assert!(equal_within_error(smallest, next));
        assert!(equal_within_error(smallest, 0.0));
        assert!(!equal_within_error(f64::MIN_POSITIVE / 4.0, 0.0));
    }

    #[test]
    fn dist_is_euclidean() {
        assert_eq!(dist(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(dist(1.0, 1.0, 1.0, 1.0), 0.0);
    }
}
