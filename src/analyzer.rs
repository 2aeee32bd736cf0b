//! Main `LandingAnalyzer` entry point and builder.

use crate::config::{Config, Pole};
use crate::error::Result;
use crate::estimator::RegionEstimator;
use crate::result::{Method, RegionReport};
use crate::sample::SampleSet;
use crate::types::Observation;

/// Main entry point for landing dispersion analysis.
///
/// Use the builder pattern to configure and run an estimate.
///
/// # Example
///
/// ```ignore
/// use landing_region::{LandingAnalyzer, Method};
///
/// let landings = vec![(12.0, -3.5), (18.2, 1.0), (9.7, 4.4), (15.1, -0.2)];
///
/// let report = LandingAnalyzer::new()
///     .seed(42)
///     .bootstrap_iterations(5_000)
///     .estimate(Method::Empirical, landings, 0.95)?;
///
/// println!("{} region, area {:.1}", report.method, report.region.area());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LandingAnalyzer {
    config: Config,
}

impl LandingAnalyzer {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Create with a reduced bootstrap count for quick exploratory runs.
    ///
    /// - 500 bootstrap resamples (vs 2,000 default)
    pub fn quick() -> Self {
        Self {
            config: Config {
                bootstrap_iterations: 500,
                ..Config::default()
            },
        }
    }

    /// Set the number of bootstrap resamples for the empirical method.
    pub fn bootstrap_iterations(mut self, n: usize) -> Self {
        self.config.bootstrap_iterations = n;
        self
    }

    /// Set the number of angular sectors for the directional method.
    pub fn sectors(mut self, n: usize) -> Self {
        self.config.sector_count = n;
        self
    }

    /// Set the per-sector minimum before neighbouring sectors are pooled.
    pub fn min_sector_count(mut self, n: usize) -> Self {
        self.config.min_sector_count = n;
        self
    }

    /// Set the chi-square quantile above which `extreme-quantile` is attached.
    pub fn quantile_sanity_bound(mut self, bound: f64) -> Self {
        self.config.quantile_sanity_bound = bound;
        self
    }

    /// Set the relative eigenvalue tolerance for collinear samples.
    pub fn collinear_tolerance(mut self, tolerance: f64) -> Self {
        self.config.collinear_tolerance = tolerance;
        self
    }

    /// Set the allowed coverage shortfall before `coverage-shortfall` is attached.
    pub fn coverage_tolerance(mut self, tolerance: f64) -> Self {
        self.config.coverage_tolerance = tolerance;
        self
    }

    /// Fix the resampling seed for bit-reproducible results.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the pole of the directional partition.
    pub fn pole(mut self, pole: Pole) -> Self {
        self.config.pole = pole;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the estimator for `method` from the current configuration.
    pub fn estimator(&self, method: Method) -> Result<RegionEstimator> {
        RegionEstimator::from_config(method, &self.config)
    }

    /// Validate raw observations and estimate the region at `level`.
    ///
    /// # Errors
    ///
    /// Any [`RegionError`](crate::RegionError): invalid observations or
    /// level, too little data, or an invalid configuration. Nothing is
    /// computed when an error is returned.
    pub fn estimate<I, O>(&self, method: Method, observations: I, level: f64) -> Result<RegionReport>
    where
        I: IntoIterator<Item = O>,
        O: Into<Observation>,
    {
        let samples = SampleSet::new(observations)?;
        self.estimate_samples(method, &samples, level)
    }

    /// Estimate the region for an already validated sample.
    pub fn estimate_samples(&self, method: Method, samples: &SampleSet, level: f64) -> Result<RegionReport> {
        let estimator = self.estimator(method)?;
        estimator.estimate(samples, level, self.config.seed)
    }

    /// Estimate nested regions for several levels at once.
    ///
    /// All levels share one resampling seed.
    pub fn estimate_levels(
        &self,
        method: Method,
        samples: &SampleSet,
        levels: &[f64],
    ) -> Result<Vec<RegionReport>> {
        let estimator = self.estimator(method)?;
        estimator.estimate_levels(samples, levels, self.config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegionError;

    #[test]
    fn test_builder_sets_config() {
        let analyzer = LandingAnalyzer::new()
            .bootstrap_iterations(123)
            .sectors(8)
            .min_sector_count(3)
            .seed(9)
            .pole(Pole::SampleMean);
        let config = analyzer.config();
        assert_eq!(config.bootstrap_iterations, 123);
        assert_eq!(config.sector_count, 8);
        assert_eq!(config.min_sector_count, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.pole, Pole::SampleMean);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = LandingAnalyzer::new()
            .sectors(2)
            .estimate(Method::Parametric, [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], 0.9)
            .unwrap_err();
        assert!(matches!(err, RegionError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_level_before_work() {
        let err = LandingAnalyzer::new()
            .estimate(Method::Empirical, [(0.0, 0.0), (1.0, 1.0)], 1.0)
            .unwrap_err();
        assert_eq!(err, RegionError::InvalidLevel(1.0));
    }

    #[test]
    fn test_estimate_levels_validates_all_first() {
        let samples = SampleSet::new([(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)]).unwrap();
        let err = LandingAnalyzer::new()
            .estimate_levels(Method::Parametric, &samples, &[0.5, 0.9, 1.2])
            .unwrap_err();
        assert_eq!(err, RegionError::InvalidLevel(1.2));
    }
}
