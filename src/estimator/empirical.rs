//! Bootstrap depth region.
//!
//! Bootstrap means are ranked by Mahalanobis distance from the sample mean
//! under the original Σ; the convex hull of the closest `level` fraction is
//! the region. No normality is assumed, so skew in the sample shows up as
//! an asymmetric hull.

use crate::config::Config;
use crate::error::Result;
use crate::geometry::convex_hull;
use crate::result::{Method, Polygon, Region, RegionReport, RegionWarning};
use crate::sample::{mahalanobis_squared, SampleSet};
use crate::statistics::{ConfidenceLevel, ConfidenceResolver, ResamplingEngine};
use crate::types::{Matrix2, Vector2};

use super::Warnings;

/// Empirical (bootstrap) estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Empirical {
    iterations: usize,
    resolver: ConfidenceResolver,
    coverage_tolerance: f64,
}

impl Default for Empirical {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Empirical {
    /// Create with `iterations` bootstrap resamples.
    pub fn new(iterations: usize, coverage_tolerance: f64) -> Self {
        Self {
            iterations: iterations.max(1),
            resolver: ConfidenceResolver::default(),
            coverage_tolerance,
        }
    }

    /// Create from the shared configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            iterations: config.bootstrap_iterations.max(1),
            resolver: ConfidenceResolver::new(config.quantile_sanity_bound),
            coverage_tolerance: config.coverage_tolerance,
        }
    }

    /// Bootstrap resamples per estimate.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Build the depth region at `level`.
    ///
    /// A singular Σ falls back to its pseudo-inverse as the metric and
    /// attaches `degenerate-sample`; so does a hull with no interior.
    pub fn estimate(
        &self,
        samples: &SampleSet,
        level: ConfidenceLevel,
        seed: Option<u64>,
    ) -> Result<RegionReport> {
        let mut warnings = Warnings::new(Method::Empirical);

        let engine = match seed {
            Some(seed) => ResamplingEngine::new(self.iterations, seed),
            None => ResamplingEngine::from_entropy(self.iterations),
        };
        let means = engine.resample_means(samples);

        let center = samples.mean();
        let precision = match samples.precision() {
            Ok(precision) => precision,
            Err(err) => {
                warnings.push(RegionWarning::DegenerateSample, &err.to_string());
                pseudo_precision(&samples.covariance())
            }
        };

        let mut ranked: Vec<(f64, Vector2)> = means
            .iter()
            .map(|m| (mahalanobis_squared(m, &center, &precision), *m))
            .collect();
        // Full key so ties never depend on resample order
        ranked.sort_by(|(da, a), (db, b)| {
            da.total_cmp(db)
                .then(a[0].total_cmp(&b[0]))
                .then(a[1].total_cmp(&b[1]))
        });

        let cutoff = self.resolver.empirical_quantile_index(level, ranked.len());
        let kept: Vec<Vector2> = ranked[..=cutoff].iter().map(|(_, m)| *m).collect();

        tracing::debug!(
            level = level.value(),
            seed = engine.seed(),
            iterations = engine.iterations(),
            kept = kept.len(),
            depth_cutoff = ranked[cutoff].0,
            "empirical depth region resolved"
        );

        let hull = convex_hull(&kept);
        if hull.len() < 3 {
            warnings.push(
                RegionWarning::DegenerateSample,
                &format!("bootstrap hull has only {} distinct vertices", hull.len()),
            );
        }

        let region = Region::Polygon(Polygon::from_points(&hull));
        let coverage = region.coverage_of(means.iter());
        warnings.check_coverage(coverage, level, self.coverage_tolerance);

        Ok(RegionReport {
            method: Method::Empirical,
            level: level.value(),
            sample_size: samples.size(),
            region,
            warnings: warnings.into_vec(),
            coverage,
            mean: [center[0], center[1]],
            seed: Some(engine.seed()),
        })
    }
}

/// Moore-Penrose inverse of a singular covariance.
///
/// Distances along the sample's direction of spread stay meaningful; the
/// zero matrix (all points identical) maps to zero.
fn pseudo_precision(covariance: &Matrix2) -> Matrix2 {
    let eps = covariance.norm() * 1e-12;
    covariance
        .pseudo_inverse(eps)
        .unwrap_or_else(|_| Matrix2::zeros())
}
