use super::*;
use crate::types::Point;
use approx::assert_relative_eq;
use std::f64::consts::PI;

const STANDARD: LogGammaStrategy = LogGammaStrategy::Standard;

#[test]
fn score_grows_strictly_with_aligned_count() {
    for strategy in [LogGammaStrategy::Standard, LogGammaStrategy::Approximate] {
        let scores: Vec<f64> = (0..=60)
            .map(|k| log_nfa(60, k, 0.125, 0.0, strategy).expect("valid arguments"))
            .collect();
        for (k, pair) in scores.windows(2).enumerate() {
            assert!(pair[1] > pair[0], "{strategy:?}: k={k} {} !< {}", pair[0], pair[1]);
        }
    }
}

#[test]
fn trivial_tails_reduce_to_number_of_tests() {
    assert_eq!(log_nfa(0, 0, 0.125, 3.0, STANDARD), Ok(-3.0));
    assert_eq!(log_nfa(40, 0, 0.125, 3.0, STANDARD), Ok(-3.0));
    let all = log_nfa(20, 20, 0.125, 3.0, STANDARD).expect("valid arguments");
    assert_relative_eq!(all, -3.0 - 20.0 * 0.125f64.log10(), epsilon = 1e-12);
}

#[test]
fn truncated_tail_stays_within_ten_percent() {
    // P(X >= 1) = 1 - (1 - p)^n
    let score = log_nfa(10, 1, 0.25, 0.0, STANDARD).expect("valid arguments");
    let expected = -(1.0 - 0.75f64.powi(10)).log10();
    assert_relative_eq!(score, expected, max_relative = 0.1);
}

#[test]
fn invalid_arguments_are_reported() {
    assert_eq!(
        log_nfa(5, 6, 0.125, 0.0, STANDARD),
        Err(NfaError::InvalidArguments { n: 5, k: 6, p: 0.125 })
    );
    assert!(log_nfa(5, 2, 0.0, 0.0, STANDARD).is_err());
    assert!(log_nfa(5, 2, 1.0, 0.0, STANDARD).is_err());
    assert!(log_nfa(5, 2, f64::NAN, 0.0, STANDARD).is_err());
}

#[test]
fn underflowing_first_term_uses_log_directly() {
    let score = log_nfa(5000, 4000, 0.125, 0.0, STANDARD).expect("valid arguments");
    assert!(score.is_finite());
    assert!(score > 1000.0);
}

#[test]
fn number_of_tests_formula() {
    let expected = 2.5 * (100f64.log10() + 50f64.log10()) + 11f64.log10();
    assert_relative_eq!(log_number_of_tests(100, 50), expected, epsilon = 1e-12);
}

/// Row 5, columns 0..=30 carry horizontal level lines; nothing else does.
fn thin_line_field() -> GradientField {
    GradientField::from_angles(40, 10, |x, y| (y == 5 && x <= 30).then_some(0.0))
}

fn wide_rect() -> Rect {
    Rect {
        p1: Point::new(0.0, 5.0),
        p2: Point::new(30.0, 5.0),
        width: 3.0,
        center: Point::new(15.0, 5.0),
        dx: 1.0,
        dy: 0.0,
        theta: 0.0,
        prec: 0.125 * PI,
        p: 0.125,
    }
}

#[test]
fn counts_footprint_and_aligned_pixels() {
    let field = thin_line_field();
    assert_eq!(count_aligned(&wide_rect(), &field), (93, 31));
}

#[test]
fn improvement_tightens_precision_and_width() {
    let field = thin_line_field();
    // An unreachable epsilon forces every stage to run.
    let validator = NfaValidator::new(40, 10, 1e6, STANDARD, true);
    let mut rect = wide_rect();
    let plain = validator.rect_log_nfa(&rect, &field).expect("valid rect");
    let improved = validator.evaluate(&mut rect, &field).expect("valid rect");
    assert!(improved > plain);
    assert!(rect.p < 0.125);
    assert!(rect.width <= 1.5);
    assert!(rect.width >= MIN_IMPROVED_WIDTH);
    assert_eq!(count_aligned(&rect, &field).0, 31);
}

#[test]
fn evaluation_without_improvement_leaves_rect_alone() {
    let field = thin_line_field();
    let validator = NfaValidator::new(40, 10, 1e6, STANDARD, false);
    let mut rect = wide_rect();
    let plain = validator.rect_log_nfa(&rect, &field).expect("valid rect");
    let score = validator.evaluate(&mut rect, &field).expect("valid rect");
    assert_eq!(score, plain);
    assert_eq!(rect, wide_rect());
    assert!(!validator.is_meaningful(score));
}

#[test]
fn meaningful_rect_skips_improvement() {
    let field = thin_line_field();
    let validator = NfaValidator::new(40, 10, 0.0, STANDARD, true);
    let thin = Rect {
        width: 1.0,
        ..wide_rect()
    };
    let mut rect = thin;
    let score = validator.evaluate(&mut rect, &field).expect("valid rect");
    assert!(validator.is_meaningful(score));
    assert_eq!(rect, thin);
    assert_eq!(count_aligned(&rect, &field), (31, 31));
}
