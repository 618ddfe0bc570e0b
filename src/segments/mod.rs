//! Output segments of the detector.
//!
//! A [`LineSegment`] is emitted once per accepted rectangle, in original
//! image coordinates (pixel-centre convention, scale undone). Segments are
//! plain data: immutable after emission and serializable.

mod segment;

pub use segment::LineSegment;
