//! Line segment detector orchestrating the a contrario pipeline.
//!
//! Overview
//! - Gaussian scale-space resampling of the input (skipped at scale 1).
//! - Gradient field with level-line angles, thresholded by the quantisation
//!   bound `quant / sin(tolerance)`.
//! - Seeds are taken in approximately descending gradient magnitude. Each
//!   unused seed with a defined angle grows an angle-coherent region.
//! - Each region is approximated by an oriented rectangle, then validated
//!   by density and by its Number of False Alarms. Rejected candidates go
//!   through the refinement strategies.
//! - Accepted rectangles become [`LineSegment`](crate::LineSegment)s in
//!   original image coordinates.
//!
//! Modules
//! - [`params`]: configuration and the derived per-image thresholds.
//! - `pipeline`: the [`LineSegmentDetector`] implementation.
//!
//! Key Ideas
//! - A pixel joins at most one region per run; pixels of discarded and
//!   rejected regions stay used, which bounds the run by the image size.
//! - The detector holds only its parameters. Every run allocates its own
//!   working state, so a detector can be shared across threads.

pub mod params;
mod pipeline;

pub use params::{LsdParams, ResolvedParams};
pub use pipeline::LineSegmentDetector;
