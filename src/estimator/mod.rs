//! Confidence region estimators.
//!
//! Three stateless strategies share one capability, `estimate`:
//!
//! 1. **Parametric** ([`Parametric`]): chi-square scaled covariance ellipse
//! 2. **Empirical** ([`Empirical`]): convex hull of depth-ranked bootstrap means
//! 3. **Directional** ([`Directional`]): per-sector radial quantiles
//!
//! [`RegionEstimator`] is the tagged union selected at call time.

mod directional;
mod empirical;
mod parametric;

pub use directional::Directional;
pub use empirical::Empirical;
pub use parametric::Parametric;

use crate::config::Config;
use crate::error::Result;
use crate::result::{Method, RegionReport, RegionWarning};
use crate::sample::SampleSet;
use crate::statistics::ConfidenceLevel;

/// A region estimation strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionEstimator {
    /// Bivariate-normal ellipse.
    Parametric(Parametric),
    /// Bootstrap depth region.
    Empirical(Empirical),
    /// Sector-wise radial quantiles.
    Directional(Directional),
}

impl RegionEstimator {
    /// Build the estimator for `method` from a validated configuration.
    pub fn from_config(method: Method, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(match method {
            Method::Parametric => RegionEstimator::Parametric(Parametric::from_config(config)),
            Method::Empirical => RegionEstimator::Empirical(Empirical::from_config(config)),
            Method::Directional => RegionEstimator::Directional(Directional::from_config(config)),
        })
    }

    /// The strategy this estimator implements.
    pub fn method(&self) -> Method {
        match self {
            RegionEstimator::Parametric(_) => Method::Parametric,
            RegionEstimator::Empirical(_) => Method::Empirical,
            RegionEstimator::Directional(_) => Method::Directional,
        }
    }

    /// Estimate the confidence region at `level`.
    ///
    /// `seed` only affects resampling; `None` draws one from the
    /// process-local RNG and records it in the report.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidLevel`](crate::RegionError::InvalidLevel) for
    ///   a level outside (0, 1)
    /// - [`RegionError::InsufficientData`](crate::RegionError::InsufficientData)
    ///   when the directional estimator cannot reach its sector minimum
    pub fn estimate(&self, samples: &SampleSet, level: f64, seed: Option<u64>) -> Result<RegionReport> {
        let level = ConfidenceLevel::new(level)?;
        match self {
            RegionEstimator::Parametric(p) => p.estimate(samples, level),
            RegionEstimator::Empirical(e) => e.estimate(samples, level, seed),
            RegionEstimator::Directional(d) => d.estimate(samples, level),
        }
    }

    /// Estimate one region per level.
    ///
    /// All levels are validated before any work starts, and every level
    /// shares one resampling seed, so regions for increasing levels are
    /// nested.
    pub fn estimate_levels(
        &self,
        samples: &SampleSet,
        levels: &[f64],
        seed: Option<u64>,
    ) -> Result<Vec<RegionReport>> {
        for &level in levels {
            ConfidenceLevel::new(level)?;
        }
        let seed = Some(seed.unwrap_or_else(rand::random));
        levels
            .iter()
            .map(|&level| self.estimate(samples, level, seed))
            .collect()
    }
}

impl From<Parametric> for RegionEstimator {
    fn from(p: Parametric) -> Self {
        RegionEstimator::Parametric(p)
    }
}

impl From<Empirical> for RegionEstimator {
    fn from(e: Empirical) -> Self {
        RegionEstimator::Empirical(e)
    }
}

impl From<Directional> for RegionEstimator {
    fn from(d: Directional) -> Self {
        RegionEstimator::Directional(d)
    }
}

/// Warnings collected while building one report.
#[derive(Debug)]
struct Warnings {
    method: Method,
    list: Vec<RegionWarning>,
}

impl Warnings {
    fn new(method: Method) -> Self {
        Self {
            method,
            list: Vec::new(),
        }
    }

    /// Attach a warning once, logging the detail that triggered it.
    fn push(&mut self, warning: RegionWarning, detail: &str) {
        if self.list.contains(&warning) {
            return;
        }
        tracing::warn!(
            method = self.method.name(),
            warning = warning.code(),
            "{detail}"
        );
        self.list.push(warning);
    }

    /// Flag a region whose measured coverage is below `level - tolerance`.
    fn check_coverage(&mut self, coverage: f64, level: ConfidenceLevel, tolerance: f64) {
        if coverage < level.value() - tolerance {
            self.push(
                RegionWarning::CoverageShortfall,
                &format!(
                    "region covers {:.1}% of its construction mass, requested {:.1}%",
                    coverage * 100.0,
                    level.value() * 100.0
                ),
            );
        }
    }

    fn into_vec(self) -> Vec<RegionWarning> {
        self.list
    }
}
