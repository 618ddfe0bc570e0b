//! Diagnostics data model returned alongside detected segments.
//!
//! [`DetectionReport`] is the entry point: it records what the detector saw
//! (input and working sizes), how long each stage took, and how every seed
//! attempt ended. All types serialize to camelCase JSON for the tool binary.

pub mod report;
pub mod timing;

pub use report::{DetectionReport, DetectionStats, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
