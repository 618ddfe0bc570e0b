//! Parameters configuring the line segment detector.
//!
//! Defaults are the LSD literature values. Every field can be overridden from
//! JSON; missing fields keep their default. Call [`LsdParams::validate`]
//! before use; [`LsdParams::resolve`] derives the thresholds that depend on
//! the working image size.

use crate::error::LsdError;
use crate::nfa::{log_number_of_tests, LogGammaStrategy};
use serde::{Deserialize, Serialize};

/// User-facing detector parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsdParams {
    /// Resampling factor applied before detection (1.0 disables scaling).
    pub scale: f64,
    /// Gaussian sigma is `sigma_scale / scale` when downsampling.
    pub sigma_scale: f64,
    /// Bound on the gradient quantisation error, in intensity units.
    pub quant: f64,
    /// Minimum gradient magnitude for a defined angle. `None` derives it
    /// from `quant` and the angle tolerance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_threshold: Option<f64>,
    /// Region-growing tolerance in degrees.
    pub angle_tolerance_deg: f64,
    /// Smallest region considered. `None` derives it from the number of tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_region_size: Option<usize>,
    /// Minimum fraction of a rectangle covered by its region.
    pub density_threshold: f64,
    /// Bins used by the magnitude-ordered traversal.
    pub n_bins: usize,
    /// Detection threshold on `−log10(NFA)`.
    pub log_eps: f64,
    pub log_gamma: LogGammaStrategy,
    /// Run the refinement strategies on rejected candidates.
    pub refine: bool,
    /// Run the NFA rectangle-improvement loop.
    pub improve: bool,
}

impl Default for LsdParams {
    fn default() -> Self {
        Self {
            scale: 0.8,
            sigma_scale: 0.6,
            quant: 2.0,
            gradient_threshold: None,
            angle_tolerance_deg: 22.5,
            min_region_size: None,
            density_threshold: 0.7,
            n_bins: 1024,
            log_eps: 0.0,
            log_gamma: LogGammaStrategy::Standard,
            refine: true,
            improve: true,
        }
    }
}

/// Thresholds derived from [`LsdParams`] for a given working image size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedParams {
    pub gradient_threshold: f64,
    /// Region-growing tolerance in radians.
    pub tolerance: f64,
    /// Angle precision fraction `tolerance / π`, also the aligned prior.
    pub p: f64,
    pub min_region_size: usize,
    pub density_threshold: f64,
    pub log_nt: f64,
}

impl LsdParams {
    /// Check every documented constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), LsdError> {
        check_finite("scale", self.scale)?;
        if self.scale <= 0.0 {
            return Err(invalid("scale", self.scale, "must be positive"));
        }
        check_finite("sigma_scale", self.sigma_scale)?;
        if self.sigma_scale <= 0.0 {
            return Err(invalid("sigma_scale", self.sigma_scale, "must be positive"));
        }
        check_finite("quant", self.quant)?;
        if self.quant < 0.0 {
            return Err(invalid("quant", self.quant, "must be non-negative"));
        }
        if let Some(threshold) = self.gradient_threshold {
            check_finite("gradient_threshold", threshold)?;
            if threshold < 0.0 {
                return Err(invalid("gradient_threshold", threshold, "must be non-negative"));
            }
        }
        check_finite("angle_tolerance_deg", self.angle_tolerance_deg)?;
        if self.angle_tolerance_deg <= 0.0 || self.angle_tolerance_deg >= 180.0 {
            return Err(invalid(
                "angle_tolerance_deg",
                self.angle_tolerance_deg,
                "must lie in (0, 180)",
            ));
        }
        check_finite("density_threshold", self.density_threshold)?;
        if !(0.0..=1.0).contains(&self.density_threshold) {
            return Err(invalid(
                "density_threshold",
                self.density_threshold,
                "must lie in [0, 1]",
            ));
        }
        if self.n_bins == 0 {
            return Err(invalid("n_bins", 0.0, "must be at least 1"));
        }
        check_finite("log_eps", self.log_eps)?;
        Ok(())
    }

    /// Derive size-dependent thresholds for a `width × height` working image.
    pub fn resolve(&self, width: usize, height: usize) -> ResolvedParams {
        let p = self.angle_tolerance_deg / 180.0;
        let tolerance = p * std::f64::consts::PI;
        let log_nt = log_number_of_tests(width, height);
        let gradient_threshold = self
            .gradient_threshold
            .unwrap_or_else(|| self.quant / tolerance.sin());
        let min_region_size = self
            .min_region_size
            .unwrap_or_else(|| (-log_nt / p.log10()).max(0.0) as usize);
        ResolvedParams {
            gradient_threshold,
            tolerance,
            p,
            min_region_size,
            density_threshold: self.density_threshold,
            log_nt,
        }
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> LsdError {
    LsdError::InvalidParameter {
        name,
        value,
        reason,
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), LsdError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite"))
    }
}
