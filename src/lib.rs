#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod segments;
pub mod types;

// Pipeline stages, public for tools and tests that drive them one by one.
pub mod angle;
pub mod config;
pub mod gradient;
pub mod nfa;
pub mod numeric;
pub mod rect;
pub mod refine;
pub mod region;
pub mod scale;
pub mod traversal;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{LineSegmentDetector, LsdParams};
pub use crate::error::{LsdError, LsdResult, NfaError};
pub use crate::image::{Grid, ImageF64, ImageU8};
pub use crate::nfa::LogGammaStrategy;
pub use crate::segments::LineSegment;

pub use crate::diagnostics::{DetectionReport, DetectionStats};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lsd_detector::prelude::*;
///
/// # fn main() -> Result<(), LsdError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8::new(w, h, w, &gray)?;
///
/// let detector = LineSegmentDetector::new(LsdParams {
///     scale: 1.0,
///     ..Default::default()
/// })?;
///
/// let report = detector.detect_u8(&img)?;
/// println!("segments={} latency_ms={:.3}", report.segments.len(), report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Grid, ImageU8};
    pub use crate::{LineSegment, LineSegmentDetector, LsdError, LsdParams};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::gradient::{GradientCell, GradientField};
    pub use crate::nfa::{log_nfa, log_number_of_tests, NfaValidator};
    pub use crate::rect::{approximate, Rect, RectIter};
    pub use crate::refine::{RefineOutcome, RefineStep, RegionRefiner, Verdict};
    pub use crate::region::{Region, RegionGrower};
    pub use crate::scale::{gaussian_kernel, gaussian_sampler, scale_space};
    pub use crate::traversal::MagnitudeOrder;

    pub use crate::diagnostics::{InputDescriptor, StageTiming, TimingBreakdown};
}
