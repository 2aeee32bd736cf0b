//! # landing-region
//!
//! Direction-aware confidence regions for landing dispersion.
//!
//! Given observed landing offsets `(dx, dy)` relative to the launch site,
//! this crate estimates regions expected to contain a chosen fraction of
//! future landings, for example 95% and 99.5%. Three estimators are
//! available:
//!
//! - **Parametric**: covariance ellipse scaled by the χ²₂ quantile
//! - **Empirical**: convex hull of depth-ranked bootstrap means, no
//!   normality assumption
//! - **Directional**: per-sector radial quantiles, which follow a sample
//!   that is skewed toward one direction
//!
//! Each estimate returns a [`RegionReport`] carrying the geometry, the
//! measured coverage and any numerical degeneracy recovered along the way.
//!
//! ## Quick Start
//!
//! ```ignore
//! use landing_region::{LandingAnalyzer, Method};
//!
//! let landings = load_landings(); // Vec<(f64, f64)>
//!
//! let report = LandingAnalyzer::new()
//!     .seed(7)
//!     .estimate(Method::Directional, landings, 0.95)?;
//!
//! for warning in &report.warnings {
//!     eprintln!("{}: {}", warning.code(), warning.description());
//! }
//! ```
//!
//! ## Reproducibility
//!
//! Only the empirical estimator is random. With a seed its output is
//! bit-identical across runs and across serial/parallel execution; without
//! one, the seed drawn is recorded in [`RegionReport::seed`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod analyzer;
mod config;
mod error;
mod result;
mod sample;
mod thread_pool;
mod types;

// Functional modules
pub mod estimator;
pub mod geometry;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use analyzer::LandingAnalyzer;
pub use config::{Config, Pole};
pub use error::{RegionError, Result};
pub use estimator::{Directional, Empirical, Parametric, RegionEstimator};
pub use result::{Ellipse, Method, Polygon, Region, RegionReport, RegionWarning};
pub use sample::{mahalanobis_squared, SampleSet, MIN_OBSERVATIONS};
pub use statistics::{ConfidenceLevel, ConfidenceResolver, ResamplingEngine};
pub use types::{Matrix2, Observation, Vector2};

/// Convenience function: estimate a region with default configuration.
///
/// # Arguments
///
/// * `observations` - Landing offsets, anything convertible to [`Observation`]
/// * `method` - Estimation strategy
/// * `level` - Confidence level in (0, 1)
///
/// # Errors
///
/// See [`LandingAnalyzer::estimate`].
pub fn estimate<I, O>(observations: I, method: Method, level: f64) -> Result<RegionReport>
where
    I: IntoIterator<Item = O>,
    O: Into<Observation>,
{
    LandingAnalyzer::new().estimate(method, observations, level)
}
