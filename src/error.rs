//! Error types returned by the sampler and by the statistics helpers.

use ndarray_stats::errors::MultiInputError;
use thiserror::Error;

/// Error type produced by a failing target density.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop a Metropolis–Hastings run.
///
/// States and density values are reported as `f64` regardless of the float type the
/// sampler runs on.
#[derive(Error, Debug)]
pub enum MhError {
    #[error("target density returned {value} at x = {x}, densities must be non-negative")]
    NegativeDensity { x: f64, value: f64 },

    #[error("target density returned NaN at x = {x}")]
    NanDensity { x: f64 },

    /// Both densities vanish (0/0) or both are infinite (inf/inf).
    #[error("acceptance ratio is indeterminate for current state {current} and candidate {candidate}")]
    IndeterminateRatio { current: f64, candidate: f64 },

    /// Only raised under [`ZeroDensityPolicy::Fail`](crate::metropolis_hastings::ZeroDensityPolicy::Fail).
    #[error("target density is zero at current state {current} but positive at candidate {candidate}")]
    ZeroCurrentDensity { current: f64, candidate: f64 },

    /// The target density itself failed; the original error is kept as the source.
    #[error("target density evaluation failed")]
    Target(#[source] BoxError),

    #[error("unknown proposal kind `{0}`, expected one of: generic, independent, random-walk")]
    UnknownProposal(String),
}

/// Errors from the histogram and goodness-of-fit helpers.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("expected a non-empty sample")]
    EmptySample,

    #[error("invalid range [{lower}, {upper}), expected finite bounds with lower < upper")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("expected at least one bin")]
    ZeroBins,

    #[error(transparent)]
    ShapeMismatch(#[from] MultiInputError),

    #[error("bad argument for the Kolmogorov-Smirnov distribution: {0}")]
    BadKsArgument(f64),
}
