//! Detector pipeline driving line segment detection end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use lsd_detector::{ImageF64, LineSegmentDetector, LsdParams};
//!
//! # fn example(image: ImageF64) -> Result<(), lsd_detector::LsdError> {
//! let detector = LineSegmentDetector::new(LsdParams::default())?;
//! let report = detector.detect_with_report(&image)?;
//! for s in &report.segments {
//!     println!("({:.1},{:.1}) -> ({:.1},{:.1}) conf {:.2}", s.x1, s.y1, s.x2, s.y2, s.confidence);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::{LsdParams, ResolvedParams};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, DetectionStats, InputDescriptor, TimingBreakdown};
use crate::error::{LsdError, LsdResult};
use crate::gradient::GradientField;
use crate::image::{Grid, ImageU8};
use crate::nfa::NfaValidator;
use crate::rect::{approximate, Rect};
use crate::refine::{RefineOutcome, RegionRefiner, Verdict};
use crate::region::RegionGrower;
use crate::scale::scale_space;
use crate::segments::LineSegment;
use crate::traversal::MagnitudeOrder;
use log::debug;
use std::time::Instant;

/// A contrario line segment detector.
#[derive(Clone, Debug)]
pub struct LineSegmentDetector {
    params: LsdParams,
}

impl LineSegmentDetector {
    /// Create a detector, rejecting invalid parameters up front.
    pub fn new(params: LsdParams) -> LsdResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &LsdParams {
        &self.params
    }

    /// Detect segments in an intensity grid (0..255 scale).
    pub fn detect(&self, image: &Grid<f64>) -> LsdResult<Vec<LineSegment>> {
        Ok(self.detect_with_report(image)?.segments)
    }

    /// Detect segments in an 8-bit grayscale view.
    pub fn detect_u8(&self, gray: &ImageU8<'_>) -> LsdResult<DetectionReport> {
        self.detect_with_report(&Grid::from_u8(gray))
    }

    /// Detect segments and return them with the run's diagnostics.
    pub fn detect_with_report(&self, image: &Grid<f64>) -> LsdResult<DetectionReport> {
        self.detect_until(image, || false)
    }

    /// Like [`detect_with_report`](Self::detect_with_report), but `stop` is
    /// polled before every seed attempt. Once it returns `true` the run ends
    /// with the segments found so far and `aborted` set in the report.
    pub fn detect_until<F>(&self, image: &Grid<f64>, mut stop: F) -> LsdResult<DetectionReport>
    where
        F: FnMut() -> bool,
    {
        ensure_min_size(image.w, image.h)?;
        let params = &self.params;
        debug!(
            "LineSegmentDetector::detect start w={} h={} scale={} tol={}deg bins={} refine={} improve={}",
            image.w,
            image.h,
            params.scale,
            params.angle_tolerance_deg,
            params.n_bins,
            params.refine,
            params.improve
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let scaled = scale_space(image, params.scale, params.sigma_scale)?;
        timings.record("scale", start);
        ensure_min_size(scaled.w, scaled.h)?;
        let resolved = params.resolve(scaled.w, scaled.h);
        debug!(
            "scaled to {}x{} threshold={:.3} min_region={} logNT={:.3}",
            scaled.w, scaled.h, resolved.gradient_threshold, resolved.min_region_size, resolved.log_nt
        );

        let start = Instant::now();
        let field = GradientField::compute(&scaled, resolved.gradient_threshold);
        timings.record("gradient", start);

        let start = Instant::now();
        let order = MagnitudeOrder::new(&field, params.n_bins);
        timings.record("traversal", start);
        debug!(
            "traversal: {} pixels, max magnitude {:.3}",
            order.len(),
            field.max_magnitude
        );

        let start = Instant::now();
        let mut stats = DetectionStats {
            traversal_pixels: order.len(),
            ..Default::default()
        };
        let mut segments = Vec::new();
        let aborted = self.search(&field, &resolved, order, &mut stop, &mut stats, &mut segments);
        timings.record("search", start);
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "LineSegmentDetector::detect done segments={} seeds={} refined={} unstable={} aborted={} total={:.2}ms",
            segments.len(),
            stats.seeds,
            stats.refined_accepted,
            stats.numeric_instabilities,
            aborted,
            timings.total_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                scale: params.scale,
                scaled_width: scaled.w,
                scaled_height: scaled.h,
                gradient_threshold: resolved.gradient_threshold,
                min_region_size: resolved.min_region_size,
                log_nt: resolved.log_nt,
            },
            stats,
            timings,
            aborted,
            segments,
        })
    }

    /// Grow → approximate → validate → refine for every seed. Returns `true`
    /// when `stop` ended the traversal early.
    fn search<F>(
        &self,
        field: &GradientField,
        resolved: &ResolvedParams,
        order: MagnitudeOrder,
        stop: &mut F,
        stats: &mut DetectionStats,
        segments: &mut Vec<LineSegment>,
    ) -> bool
    where
        F: FnMut() -> bool,
    {
        let validator = NfaValidator::new(
            field.width(),
            field.height(),
            self.params.log_eps,
            self.params.log_gamma,
            self.params.improve,
        );
        let refiner = RegionRefiner::new(&validator, resolved);
        let mut grower = RegionGrower::new(field);

        for seed in order {
            if !grower.can_seed(seed) {
                continue;
            }
            if stop() {
                debug!("stop requested after {} seeds", stats.seeds);
                return true;
            }
            stats.seeds += 1;

            let Some(region) = grower.grow(seed, resolved.tolerance) else {
                continue;
            };
            if region.len() < resolved.min_region_size {
                stats.small_regions += 1;
                continue;
            }
            let Some(rect) = approximate(&region, resolved.p) else {
                stats.degenerate_regions += 1;
                continue;
            };

            let accepted = match refiner.validate(&region, rect, field) {
                Verdict::Accepted { rect, log_nfa } => Some((rect, log_nfa)),
                verdict => {
                    match verdict {
                        Verdict::LowDensity { .. } => stats.low_density += 1,
                        Verdict::NotMeaningful { .. } => stats.not_meaningful += 1,
                        Verdict::Unstable(err) => {
                            debug!("seed ({}, {}): numeric instability ({err})", seed.x, seed.y);
                            stats.numeric_instabilities += 1;
                        }
                        Verdict::Accepted { .. } => {}
                    }
                    if self.params.refine {
                        stats.refinements += 1;
                        match refiner.refine(&mut grower, region, rect) {
                            RefineOutcome::Accepted {
                                rect, log_nfa, step, ..
                            } => {
                                debug!("seed ({}, {}): accepted after {step:?}", seed.x, seed.y);
                                stats.refined_accepted += 1;
                                Some((rect, log_nfa))
                            }
                            RefineOutcome::Rejected { instabilities } => {
                                stats.numeric_instabilities += instabilities;
                                None
                            }
                        }
                    } else {
                        None
                    }
                }
            };

            if let Some((rect, log_nfa)) = accepted {
                match self.to_segment(&rect, log_nfa) {
                    Some(segment) => {
                        debug!(
                            "segment ({:.2}, {:.2}) -> ({:.2}, {:.2}) width={:.2} conf={:.2}",
                            segment.x1,
                            segment.y1,
                            segment.x2,
                            segment.y2,
                            segment.width,
                            segment.confidence
                        );
                        stats.accepted += 1;
                        segments.push(segment);
                    }
                    None => stats.invalid_confidence += 1,
                }
            }
        }
        false
    }

    /// Pixel-centre offset, undo the scaling, and drop non-positive scores.
    fn to_segment(&self, rect: &Rect, log_nfa: f64) -> Option<LineSegment> {
        if !(log_nfa.is_finite() && log_nfa > 0.0) {
            return None;
        }
        let scale = self.params.scale;
        let unscale = |v: f64| if scale != 1.0 { v / scale } else { v };
        Some(LineSegment {
            x1: unscale(rect.p1.x + 0.5),
            y1: unscale(rect.p1.y + 0.5),
            x2: unscale(rect.p2.x + 0.5),
            y2: unscale(rect.p2.y + 0.5),
            width: unscale(rect.width),
            angle_precision: rect.p,
            confidence: log_nfa,
        })
    }
}

fn ensure_min_size(width: usize, height: usize) -> Result<(), LsdError> {
    if width < 2 || height < 2 {
        Err(LsdError::ImageTooSmall { width, height })
    } else {
        Ok(())
    }
}
