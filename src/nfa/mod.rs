//! Number of False Alarms (NFA) validation of candidate rectangles.
//!
//! A rectangle covering `n` pixels, `k` of which are aligned with it, is
//! scored by the binomial upper tail `P(X ≥ k | n, p)` times the number of
//! tests `NT`. Scores are handled as `−log10(NFA)`, so bigger is better and a
//! rectangle is meaningful when the score exceeds `log_eps`.
//!
//! Tail evaluation
//! - `n == 0` or `k == 0`: the tail is 1.
//! - `n == k`: closed form `pⁿ`.
//! - Otherwise the first term comes from log-gamma, the rest from the
//!   ratio recurrence `term_{i} = term_{i−1} · (n−i+1)/i · p/(1−p)`. The sum
//!   stops once the geometric bound on the remaining terms drops below 10%
//!   of the current value.
//! - When the first term underflows, its logarithm is used directly.
//!
//! Improvement
//! - When enabled and the plain score is not meaningful, up to five stages of
//!   five variants each are tried: halve `p`, narrow, trim one side, trim the
//!   other side, halve `p` again. A variant is kept only if it raises the
//!   score, and the loop stops as soon as the rectangle is meaningful.

mod log_gamma;

pub use log_gamma::{log_gamma_lanczos, log_gamma_windschitl, LogGammaStrategy};

use crate::angle::is_aligned;
use crate::error::NfaError;
use crate::gradient::GradientField;
use crate::numeric::equal_within_error;
use crate::rect::Rect;
use std::f64::consts::LN_10;

/// Relative accuracy target of the truncated tail sum.
const TAIL_TOLERANCE: f64 = 0.1;
/// Width decrement of the improvement loop.
const IMPROVE_DELTA: f64 = 0.5;
/// Rectangles never get narrower than this.
const MIN_IMPROVED_WIDTH: f64 = 0.5;
const IMPROVE_ITERATIONS: usize = 5;

/// `log10` of the number of tests for a `width × height` image:
/// `2.5·(log10 W + log10 H) + log10 11`.
pub fn log_number_of_tests(width: usize, height: usize) -> f64 {
    2.5 * ((width as f64).log10() + (height as f64).log10()) + 11f64.log10()
}

/// `−log10(NFA)` for `k` aligned pixels out of `n` with prior `p`.
pub fn log_nfa(
    n: usize,
    k: usize,
    p: f64,
    log_nt: f64,
    strategy: LogGammaStrategy,
) -> Result<f64, NfaError> {
    if k > n || !(p > 0.0 && p < 1.0) {
        return Err(NfaError::InvalidArguments { n, k, p });
    }
    if n == 0 || k == 0 {
        return Ok(-log_nt);
    }
    if n == k {
        return finite(-log_nt - n as f64 * p.log10());
    }

    let nf = n as f64;
    let kf = k as f64;
    let p_term = p / (1.0 - p);
    let log1term = strategy.log_gamma(nf + 1.0)
        - strategy.log_gamma(kf + 1.0)
        - strategy.log_gamma(nf - kf + 1.0)
        + kf * p.ln()
        + (nf - kf) * (1.0 - p).ln();
    let mut term = log1term.exp();

    if equal_within_error(term, 0.0) {
        return if kf > nf * p {
            finite(-log1term / LN_10 - log_nt)
        } else {
            Ok(-log_nt)
        };
    }

    let mut tail = term;
    for i in (k + 1)..=n {
        let bin_term = (n - i + 1) as f64 / i as f64;
        let mult_term = bin_term * p_term;
        term *= mult_term;
        tail += term;
        if bin_term < 1.0 {
            let err = term * ((1.0 - mult_term.powi((n - i + 1) as i32)) / (1.0 - mult_term) - 1.0);
            if err < TAIL_TOLERANCE * (-tail.log10() - log_nt).abs() * tail {
                break;
            }
        }
    }
    finite(-tail.log10() - log_nt)
}

fn finite(value: f64) -> Result<f64, NfaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NfaError::NonFinite)
    }
}

/// Scores rectangles against a gradient field.
#[derive(Clone, Copy, Debug)]
pub struct NfaValidator {
    log_nt: f64,
    log_eps: f64,
    log_gamma: LogGammaStrategy,
    improve: bool,
}

impl NfaValidator {
    /// Validator for a `width × height` (scaled) image.
    pub fn new(
        width: usize,
        height: usize,
        log_eps: f64,
        log_gamma: LogGammaStrategy,
        improve: bool,
    ) -> Self {
        Self {
            log_nt: log_number_of_tests(width, height),
            log_eps,
            log_gamma,
            improve,
        }
    }

    pub fn log_nt(&self) -> f64 {
        self.log_nt
    }

    pub fn log_eps(&self) -> f64 {
        self.log_eps
    }

    #[inline]
    pub fn is_meaningful(&self, log_nfa: f64) -> bool {
        log_nfa > self.log_eps
    }

    pub fn log_nfa(&self, n: usize, k: usize, p: f64) -> Result<f64, NfaError> {
        log_nfa(n, k, p, self.log_nt, self.log_gamma)
    }

    /// Count footprint (`n`) and aligned (`k`) pixels, then score.
    pub fn rect_log_nfa(&self, rect: &Rect, field: &GradientField) -> Result<f64, NfaError> {
        let (n, k) = count_aligned(rect, field);
        self.log_nfa(n, k, rect.p)
    }

    /// Score `rect`, running the improvement loop when enabled. `rect` holds
    /// the best variant found on return.
    pub fn evaluate(&self, rect: &mut Rect, field: &GradientField) -> Result<f64, NfaError> {
        let mut best = self.rect_log_nfa(rect, field)?;
        if !self.improve || self.is_meaningful(best) {
            return Ok(best);
        }

        let stages: [fn(&mut Rect) -> bool; 5] = [
            halve_precision,
            narrow,
            trim_left,
            trim_right,
            halve_precision,
        ];
        for stage in stages {
            let mut candidate = *rect;
            for _ in 0..IMPROVE_ITERATIONS {
                if !stage(&mut candidate) {
                    continue;
                }
                let value = self.rect_log_nfa(&candidate, field)?;
                if value > best {
                    best = value;
                    *rect = candidate;
                }
            }
            if self.is_meaningful(best) {
                break;
            }
        }
        Ok(best)
    }
}

/// `(n, k)` for the rectangle's footprint inside the field.
pub fn count_aligned(rect: &Rect, field: &GradientField) -> (usize, usize) {
    rect.pixels(field.width(), field.height())
        .fold((0, 0), |(n, k), px| {
            let aligned = is_aligned(field.angle(px), rect.theta, rect.prec);
            (n + 1, k + usize::from(aligned))
        })
}

fn halve_precision(rect: &mut Rect) -> bool {
    rect.set_precision(rect.p / 2.0);
    true
}

fn narrow(rect: &mut Rect) -> bool {
    if rect.width - IMPROVE_DELTA < MIN_IMPROVED_WIDTH {
        return false;
    }
    rect.width -= IMPROVE_DELTA;
    true
}

fn trim_left(rect: &mut Rect) -> bool {
    trim_side(rect, IMPROVE_DELTA / 2.0)
}

fn trim_right(rect: &mut Rect) -> bool {
    trim_side(rect, -IMPROVE_DELTA / 2.0)
}

fn trim_side(rect: &mut Rect, offset: f64) -> bool {
    if rect.width - IMPROVE_DELTA < MIN_IMPROVED_WIDTH {
        return false;
    }
    rect.shift_sideways(offset);
    rect.width -= IMPROVE_DELTA;
    true
}

#[cfg(test)]
mod tests;
