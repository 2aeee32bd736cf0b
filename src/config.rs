//! Configuration for region estimation.

use serde::{Deserialize, Serialize};

use crate::error::{RegionError, Result};

/// Configuration options for [`LandingAnalyzer`](crate::LandingAnalyzer)
/// and the individual estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bootstrap resamples for the empirical estimator (default: 2,000).
    pub bootstrap_iterations: usize,

    /// Angular sectors for the directional estimator (default: 16).
    pub sector_count: usize,

    /// Minimum observations per sector before adjacent sectors are pooled
    /// (default: 5).
    pub min_sector_count: usize,

    /// Chi-square quantiles above this value attach an `extreme-quantile`
    /// warning (default: 50.0).
    pub quantile_sanity_bound: f64,

    /// Relative eigenvalue tolerance below which the sample is treated as
    /// collinear (default: 1e-9).
    pub collinear_tolerance: f64,

    /// Allowed shortfall of measured coverage below the requested level
    /// before a `coverage-shortfall` warning is attached (default: 0.05).
    pub coverage_tolerance: f64,

    /// Optional deterministic seed for resampling.
    ///
    /// When `None`, each estimate draws a fresh seed from the process-local
    /// RNG and records it in the report.
    pub seed: Option<u64>,

    /// Center of the angular partition used by the directional estimator.
    pub pole: Pole,
}

/// Point around which directional sectors are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pole {
    /// The launch site, i.e. the origin of the offset frame.
    #[default]
    LaunchSite,
    /// The sample mean.
    SampleMean,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bootstrap_iterations: 2_000,
            sector_count: 16,
            min_sector_count: 5,
            quantile_sanity_bound: 50.0,
            collinear_tolerance: 1e-9,
            coverage_tolerance: 0.05,
            seed: None,
            pole: Pole::LaunchSite,
        }
    }
}

impl Config {
    /// Check every tuning parameter is usable.
    ///
    /// Fewer than 4 sectors is rejected: the per-sector circumscribing
    /// radius `R / cos(π/S)` needs sectors narrower than a half plane.
    pub fn validate(&self) -> Result<()> {
        if self.bootstrap_iterations == 0 {
            return Err(RegionError::InvalidConfig(
                "bootstrap_iterations must be at least 1".to_string(),
            ));
        }
        if self.sector_count < 4 {
            return Err(RegionError::InvalidConfig(format!(
                "sector_count must be at least 4, got {}",
                self.sector_count
            )));
        }
        if self.min_sector_count == 0 {
            return Err(RegionError::InvalidConfig(
                "min_sector_count must be at least 1".to_string(),
            ));
        }
        check_non_negative("quantile_sanity_bound", self.quantile_sanity_bound)?;
        check_non_negative("collinear_tolerance", self.collinear_tolerance)?;
        check_non_negative("coverage_tolerance", self.coverage_tolerance)?;
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RegionError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}
