//! Statistical building blocks for region estimation.
//!
//! - Online mean/covariance accumulation with parallel merge
//! - Nearest-rank quantiles
//! - Confidence level resolution (chi-square and rank thresholds)
//! - Seeded bootstrap resampling

mod bootstrap;
mod covariance;
mod quantile;
mod resolver;

pub use bootstrap::{bootstrap_resample, bootstrap_resample_into, counter_rng_seed, ResamplingEngine};
pub use covariance::WelfordCovariance2;
pub use quantile::{nearest_rank_index, nearest_rank_sorted, sort_ascending};
pub use resolver::{ChiSquareQuantile, ConfidenceLevel, ConfidenceResolver, DEGREES_OF_FREEDOM};
