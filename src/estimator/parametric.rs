//! Covariance ellipse under a bivariate-normal assumption.
//!
//! For X ~ N(μ, Σ) the squared Mahalanobis distance (X-μ)ᵀΣ⁻¹(X-μ) is χ²₂,
//! so the level-l region is the ellipse with semi-axes √(k·λᵢ) along the
//! eigenvectors of Σ, where k is the χ²₂ quantile at l.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::SymmetricEigen;

use crate::config::Config;
use crate::error::Result;
use crate::result::{Ellipse, Method, Region, RegionReport, RegionWarning};
use crate::sample::SampleSet;
use crate::statistics::{ConfidenceLevel, ConfidenceResolver};
use crate::types::{Matrix2, Vector2};

use super::Warnings;

/// Parametric (Gaussian) ellipse estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parametric {
    resolver: ConfidenceResolver,
    collinear_tolerance: f64,
    coverage_tolerance: f64,
}

impl Default for Parametric {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Eigen-decomposition of a 2x2 covariance, largest eigenvalue first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PrincipalAxes {
    /// λ1 ≥ λ2 ≥ 0 (negative rounding noise clamped to 0).
    pub eigenvalues: [f64; 2],
    /// Major-axis angle in (-π/2, π/2].
    pub angle: f64,
}

pub(crate) fn principal_axes(covariance: &Matrix2) -> PrincipalAxes {
    let eigen = SymmetricEigen::new(*covariance);
    let (major, minor) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };

    let l1 = eigen.eigenvalues[major].max(0.0);
    let l2 = eigen.eigenvalues[minor].max(0.0);

    let v1 = eigen.eigenvectors.column(major);
    let mut angle = if l1 > 0.0 { v1[1].atan2(v1[0]) } else { 0.0 };
    // Eigenvectors are sign-ambiguous; fold into a half turn
    if angle <= -FRAC_PI_2 {
        angle += PI;
    } else if angle > FRAC_PI_2 {
        angle -= PI;
    }

    PrincipalAxes {
        eigenvalues: [l1, l2],
        angle,
    }
}

impl Parametric {
    /// Create with explicit tuning.
    pub fn new(resolver: ConfidenceResolver, collinear_tolerance: f64, coverage_tolerance: f64) -> Self {
        Self {
            resolver,
            collinear_tolerance,
            coverage_tolerance,
        }
    }

    /// Create from the shared configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ConfidenceResolver::new(config.quantile_sanity_bound),
            config.collinear_tolerance,
            config.coverage_tolerance,
        )
    }

    /// Build the ellipse at `level`.
    ///
    /// A (near) singular Σ never fails: when λ2 ≤ tol·λ1 the ellipse gets
    /// `semi_minor = 0` and a `collinear-sample` warning.
    pub fn estimate(&self, samples: &SampleSet, level: ConfidenceLevel) -> Result<RegionReport> {
        let mut warnings = Warnings::new(Method::Parametric);

        let k = self.resolver.chi_square_quantile(level);
        if k.exceeds_bound {
            warnings.push(
                RegionWarning::ExtremeQuantile,
                &format!(
                    "chi-square quantile {:.2} exceeds sanity bound {:.2}",
                    k.value,
                    self.resolver.sanity_bound()
                ),
            );
        }

        let axes = principal_axes(&samples.covariance());
        let [l1, l2] = axes.eigenvalues;

        tracing::debug!(
            level = level.value(),
            k = k.value,
            lambda1 = l1,
            lambda2 = l2,
            angle = axes.angle,
            "parametric ellipse resolved"
        );

        let semi_major = (k.value * l1).sqrt();
        let semi_minor = if l2 <= self.collinear_tolerance * l1 {
            warnings.push(
                RegionWarning::CollinearSample,
                &format!("minor eigenvalue {l2:e} is negligible against {l1:e}"),
            );
            0.0
        } else {
            (k.value * l2).sqrt()
        };

        let mean = samples.mean();
        let region = Region::Ellipse(Ellipse {
            center: [mean[0], mean[1]],
            semi_major,
            semi_minor,
            angle: axes.angle,
        });

        let points: Vec<Vector2> = samples.observations().iter().map(|o| o.to_vector()).collect();
        let coverage = region.coverage_of(points.iter());
        warnings.check_coverage(coverage, level, self.coverage_tolerance);

        Ok(RegionReport {
            method: Method::Parametric,
            level: level.value(),
            sample_size: samples.size(),
            region,
            warnings: warnings.into_vec(),
            coverage,
            mean: [mean[0], mean[1]],
            seed: None,
        })
    }
}
