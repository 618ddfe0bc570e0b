//! Error types surfaced to callers of the detector.

use thiserror::Error;

/// Errors reported before any detection work starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LsdError {
    /// A configuration value violates its documented constraint.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Image buffer does not match the declared dimensions.
    #[error("buffer of length {len} does not cover a {width}x{height} image")]
    BufferSize {
        width: usize,
        height: usize,
        len: usize,
    },

    /// The input grid is too small to carry a single gradient stencil.
    #[error("image {width}x{height} is too small (need at least 2x2)")]
    ImageTooSmall { width: usize, height: usize },
}

/// Numeric failures while evaluating the NFA of a candidate.
///
/// These never abort a run: the detector treats the candidate as rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum NfaError {
    #[error("invalid binomial arguments n={n}, k={k}, p={p}")]
    InvalidArguments { n: usize, k: usize, p: f64 },

    #[error("non-finite NFA value")]
    NonFinite,
}

/// Result type for fallible detector entry points.
pub type LsdResult<T> = Result<T, LsdError>;
