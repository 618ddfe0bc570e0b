//! Validation and density-driven refinement of candidate regions.
//!
//! A candidate is accepted when its rectangle is dense enough
//! (`region pixels / rectangle area ≥ density_threshold`) and its NFA score,
//! after the optional improvement loop, is meaningful.
//!
//! Two densities are in play. The acceptance gate and the `ShrinkRadius`
//! target use the *area* density above. `Regrow` instead compares the
//! *aligned* density: the fraction of member pixels whose angle matches the
//! rectangle's angle within the halved tolerance it regrows with.
//!
//! Rejected candidates go through an explicit state machine
//! [`RefineStep`]: `Regrow → ShrinkRadius → Split → Reject`. Each strategy
//! produces a new region/rectangle pair which is validated again; the machine
//! stops at the first accepted candidate. A strategy that produces a region
//! without getting it accepted hands that region to the next strategy.
//!
//! Pixels touched by refinement stay used. `Regrow` releases the region
//! temporarily so the seed can grow again, then re-marks the union of the old
//! and new pixel sets. Pixels trimmed by `ShrinkRadius` or `Split` are never
//! released.

use crate::angle::is_aligned;
use crate::detector::ResolvedParams;
use crate::error::NfaError;
use crate::gradient::GradientField;
use crate::nfa::NfaValidator;
use crate::rect::{approximate, Rect};
use crate::region::{Region, RegionGrower};
use crate::types::Pixel;
use serde::Serialize;

/// Geometric decay of the radius in [`RefineStep::ShrinkRadius`].
const RADIUS_DECAY: f64 = 0.75;

/// Refinement strategies, in the order they are attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RefineStep {
    /// Halve the growth tolerance and regrow from the seed.
    Regrow,
    /// Drop pixels outside a shrinking radius around the weighted center.
    ShrinkRadius,
    /// Bisect along the principal axis and keep the denser half.
    Split,
    /// Terminal: no strategy produced an accepted candidate.
    Reject,
}

impl RefineStep {
    pub const FIRST: Self = Self::Regrow;

    /// Transition taken after a strategy fails.
    pub fn next(self) -> Self {
        match self {
            Self::Regrow => Self::ShrinkRadius,
            Self::ShrinkRadius => Self::Split,
            Self::Split | Self::Reject => Self::Reject,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Reject
    }
}

/// Result of validating one region/rectangle pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// Dense and meaningful; `rect` is the (possibly improved) rectangle.
    Accepted { rect: Rect, log_nfa: f64 },
    LowDensity { density: f64 },
    NotMeaningful { log_nfa: f64 },
    Unstable(NfaError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Outcome of a full refinement run.
#[derive(Clone, Debug)]
pub enum RefineOutcome {
    Accepted {
        region: Region,
        rect: Rect,
        log_nfa: f64,
        step: RefineStep,
    },
    Rejected {
        /// Numeric instabilities met while validating intermediate candidates.
        instabilities: usize,
    },
}

/// Validates candidates and runs the refinement strategies.
pub struct RegionRefiner<'a> {
    validator: &'a NfaValidator,
    density_threshold: f64,
    min_region_size: usize,
    tolerance: f64,
    p: f64,
}

impl<'a> RegionRefiner<'a> {
    pub fn new(validator: &'a NfaValidator, resolved: &ResolvedParams) -> Self {
        Self {
            validator,
            density_threshold: resolved.density_threshold,
            min_region_size: resolved.min_region_size,
            tolerance: resolved.tolerance,
            p: resolved.p,
        }
    }

    /// Density check followed by the NFA test.
    pub fn validate(&self, region: &Region, rect: Rect, field: &GradientField) -> Verdict {
        let density = rect.density(region.len());
        if density < self.density_threshold {
            return Verdict::LowDensity { density };
        }
        let mut rect = rect;
        match self.validator.evaluate(&mut rect, field) {
            Ok(log_nfa) if self.validator.is_meaningful(log_nfa) => {
                Verdict::Accepted { rect, log_nfa }
            }
            Ok(log_nfa) => Verdict::NotMeaningful { log_nfa },
            Err(err) => Verdict::Unstable(err),
        }
    }

    /// Walk the strategy machine starting from a rejected candidate.
    pub fn refine(
        &self,
        grower: &mut RegionGrower<'_>,
        region: Region,
        rect: Rect,
    ) -> RefineOutcome {
        let field = grower.field();
        let mut region = region;
        let mut rect = rect;
        let mut instabilities = 0;
        let mut step = RefineStep::FIRST;

        while !step.is_terminal() {
            let attempt = match step {
                RefineStep::Regrow => self.regrow(grower, &region, &rect),
                RefineStep::ShrinkRadius => self.shrink_radius(&region, &rect, field),
                RefineStep::Split => self.split(&region, &rect, field),
                RefineStep::Reject => None,
            };
            if let Some((next_region, next_rect)) = attempt {
                match self.validate(&next_region, next_rect, field) {
                    Verdict::Accepted { rect, log_nfa } => {
                        return RefineOutcome::Accepted {
                            region: next_region,
                            rect,
                            log_nfa,
                            step,
                        };
                    }
                    Verdict::Unstable(err) => {
                        log::debug!("refine {step:?}: numeric instability ({err})");
                        instabilities += 1;
                    }
                    Verdict::LowDensity { .. } | Verdict::NotMeaningful { .. } => {}
                }
                region = next_region;
                rect = next_rect;
            }
            step = step.next();
        }
        RefineOutcome::Rejected { instabilities }
    }

    /// Regrow from the seed with half the tolerance. Succeeds only when the
    /// new region is large enough and its aligned density improves.
    pub(crate) fn regrow(
        &self,
        grower: &mut RegionGrower<'_>,
        region: &Region,
        rect: &Rect,
    ) -> Option<(Region, Rect)> {
        let field = grower.field();
        let tolerance = self.tolerance / 2.0;
        grower.release(region.pixels());
        let regrown = grower.grow(region.seed(), tolerance);
        grower.mark(region.pixels());

        let regrown = regrown?;
        if regrown.len() < self.min_region_size.max(2) {
            return None;
        }
        let new_rect = approximate(&regrown, self.p)?;
        let before = aligned_density(region, rect, field, tolerance);
        let after = aligned_density(&regrown, &new_rect, field, tolerance);
        if after > before {
            Some((regrown, new_rect))
        } else {
            None
        }
    }

    /// Shrink a disc around the weighted center until the density target is
    /// met or the region gets too small.
    pub(crate) fn shrink_radius(
        &self,
        region: &Region,
        rect: &Rect,
        field: &GradientField,
    ) -> Option<(Region, Rect)> {
        let center = region.center();
        let min_size = self.min_region_size.max(2);
        let mut radius = center.dist(&rect.p1).max(center.dist(&rect.p2));
        let mut kept: Vec<Pixel> = region.pixels().to_vec();

        loop {
            radius *= RADIUS_DECAY;
            let r2 = radius * radius;
            kept.retain(|px| {
                let dx = px.x as f64 - center.x;
                let dy = px.y as f64 - center.y;
                dx * dx + dy * dy <= r2
            });
            if kept.len() < min_size {
                return None;
            }
            let shrunk = Region::from_pixels(region.seed(), &kept, field)?;
            let shrunk_rect = approximate(&shrunk, self.p)?;
            if shrunk_rect.density(shrunk.len()) >= self.density_threshold {
                return Some((shrunk, shrunk_rect));
            }
        }
    }

    /// Bisect perpendicular to the axis through the weighted center and keep
    /// the denser half that still meets the minimum size.
    pub(crate) fn split(
        &self,
        region: &Region,
        rect: &Rect,
        field: &GradientField,
    ) -> Option<(Region, Rect)> {
        let center = region.center();
        let (behind, ahead): (Vec<Pixel>, Vec<Pixel>) =
            region.pixels().iter().copied().partition(|px| {
                (px.x as f64 - center.x) * rect.dx + (px.y as f64 - center.y) * rect.dy < 0.0
            });
        let min_size = self.min_region_size.max(2);

        [behind, ahead]
            .into_iter()
            .filter(|half| half.len() >= min_size)
            .filter_map(|half| {
                let seed = half[0];
                let half_region = Region::from_pixels(seed, &half, field)?;
                let half_rect = approximate(&half_region, self.p)?;
                let density = half_rect.density(half_region.len());
                Some((density, half_region, half_rect))
            })
            .fold(None, |best: Option<(f64, Region, Rect)>, cand| match best {
                Some(b) if b.0 >= cand.0 => Some(b),
                _ => Some(cand),
            })
            .map(|(_, r, rc)| (r, rc))
    }
}

/// Fraction of `region` pixels whose angle lies within `tolerance` of the
/// rectangle's angle.
pub(crate) fn aligned_density(
    region: &Region,
    rect: &Rect,
    field: &GradientField,
    tolerance: f64,
) -> f64 {
    if region.is_empty() {
        return 0.0;
    }
    let aligned = region
        .pixels()
        .iter()
        .filter(|&&px| is_aligned(field.angle(px), rect.theta, tolerance))
        .count();
    aligned as f64 / region.len() as f64
}

#[cfg(test)]
mod tests;
