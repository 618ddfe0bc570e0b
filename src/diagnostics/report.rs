use super::TimingBreakdown;
use crate::segments::LineSegment;
use serde::Serialize;

/// Result of [`LineSegmentDetector::detect_with_report`](crate::LineSegmentDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub stats: DetectionStats,
    pub timings: TimingBreakdown,
    /// Set when a stop predicate ended the run before the traversal finished.
    pub aborted: bool,
    pub segments: Vec<LineSegment>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub scale: f64,
    /// Size of the grid the detector actually worked on.
    pub scaled_width: usize,
    pub scaled_height: usize,
    pub gradient_threshold: f64,
    pub min_region_size: usize,
    pub log_nt: f64,
}

/// How the seed attempts of a run ended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionStats {
    /// Pixels emitted by the magnitude-ordered traversal.
    pub traversal_pixels: usize,
    /// Traversal pixels that started a region.
    pub seeds: usize,
    /// Regions below the minimum size.
    pub small_regions: usize,
    /// Regions whose rectangle had zero length.
    pub degenerate_regions: usize,
    pub low_density: usize,
    pub not_meaningful: usize,
    pub numeric_instabilities: usize,
    /// Candidates handed to the refinement strategies.
    pub refinements: usize,
    /// Refined candidates that ended up accepted.
    pub refined_accepted: usize,
    /// Accepted rectangles dropped for a non-finite or non-positive confidence.
    pub invalid_confidence: usize,
    pub accepted: usize,
}

impl DetectionReport {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} segments from {} seeds on {}x{} (scaled {}x{}) in {:.2} ms{}",
            self.segments.len(),
            self.stats.seeds,
            self.input.width,
            self.input.height,
            self.input.scaled_width,
            self.input.scaled_height,
            self.timings.total_ms,
            if self.aborted { " [aborted]" } else { "" }
        )
    }
}
