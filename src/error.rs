//! Error type for region estimation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegionError>;

/// Errors that abort an estimation.
///
/// Every variant except `DegenerateSample` signals caller misuse and is
/// never recovered internally. Numerical degeneracies inside an estimator
/// become [`RegionWarning`](crate::RegionWarning)s on the report instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// An observation had a NaN or infinite component.
    #[error("observation {index} is not finite: ({dx}, {dy})")]
    InvalidObservation {
        /// Position of the offending observation in the input.
        index: usize,
        /// Downrange component as supplied.
        dx: f64,
        /// Crossrange component as supplied.
        dy: f64,
    },

    /// Too few observations for the requested computation.
    #[error("insufficient data: {available} observations available, {required} required")]
    InsufficientData {
        /// Observations supplied.
        available: usize,
        /// Minimum needed.
        required: usize,
    },

    /// Confidence level outside the open interval (0, 1).
    #[error("confidence level {0} is outside (0, 1)")]
    InvalidLevel(f64),

    /// The covariance matrix is singular where an inverse was required.
    #[error("degenerate sample: {0}")]
    DegenerateSample(String),

    /// A tuning parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
