//! Sector-wise radial quantile region.
//!
//! Bearings around the pole are split into `S` equal sectors. Each sector
//! gets its own nearest-rank radius at the requested level, so a sample
//! that lands mostly toward one corner produces a region stretched toward
//! that corner rather than a symmetric shape around the mean.
//!
//! Sector `s` contributes two vertices on its boundary rays at radius
//! `R_s / cos(π/S)`. The chord between them sits at distance `R_s` from
//! the pole, so the polygon contains the full circular sector of radius
//! `R_s`.

use std::f64::consts::TAU;

use crate::config::{Config, Pole};
use crate::error::{RegionError, Result};
use crate::geometry::normalize_angle;
use crate::result::{Method, Polygon, Region, RegionReport, RegionWarning};
use crate::sample::SampleSet;
use crate::statistics::{nearest_rank_sorted, sort_ascending, ConfidenceLevel};
use crate::types::Vector2;

use super::Warnings;

/// Directional (sector quantile) estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directional {
    sector_count: usize,
    min_sector_count: usize,
    pole: Pole,
    coverage_tolerance: f64,
}

impl Default for Directional {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Directional {
    /// Create with `sector_count` sectors (at least 4) and a per-sector
    /// minimum of `min_sector_count` observations (at least 1).
    pub fn new(sector_count: usize, min_sector_count: usize, pole: Pole) -> Self {
        Self {
            sector_count: sector_count.max(4),
            min_sector_count: min_sector_count.max(1),
            pole,
            coverage_tolerance: Config::default().coverage_tolerance,
        }
    }

    /// Create from the shared configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            coverage_tolerance: config.coverage_tolerance,
            ..Self::new(config.sector_count, config.min_sector_count, config.pole)
        }
    }

    /// Number of angular sectors.
    pub fn sector_count(&self) -> usize {
        self.sector_count
    }

    fn sector_width(&self) -> f64 {
        TAU / self.sector_count as f64
    }

    fn sector_of(&self, bearing: f64) -> usize {
        let s = (normalize_angle(bearing) / self.sector_width()) as usize;
        s.min(self.sector_count - 1)
    }

    /// Radii of the observations in each sector, relative to `pole`.
    fn bucket(&self, samples: &SampleSet, pole: &Vector2) -> Vec<Vec<f64>> {
        let mut buckets = vec![Vec::new(); self.sector_count];
        for o in samples.observations() {
            let rel = o.to_vector() - pole;
            let bearing = rel[1].atan2(rel[0]);
            buckets[self.sector_of(bearing)].push(rel.norm());
        }
        buckets
    }

    /// Radii for sector `s`, widening symmetrically over neighbours until
    /// the minimum count is met. Returns the radii and the half-width used.
    fn pooled(&self, buckets: &[Vec<f64>], s: usize) -> (Vec<f64>, usize) {
        let n = self.sector_count;
        let mut radii = buckets[s].clone();
        let mut half_width = 0;

        while radii.len() < self.min_sector_count && 2 * half_width + 1 < n {
            half_width += 1;
            let left = (s + n - half_width) % n;
            let right = (s + half_width) % n;
            radii.extend_from_slice(&buckets[left]);
            if right != left {
                radii.extend_from_slice(&buckets[right]);
            }
        }

        (radii, half_width)
    }

    /// Per-sector quantile radii `R_s` at `level`.
    ///
    /// # Errors
    ///
    /// [`RegionError::InsufficientData`] when the whole sample is smaller
    /// than the per-sector minimum, so no amount of pooling can reach it.
    pub fn sector_radii(&self, samples: &SampleSet, level: ConfidenceLevel) -> Result<Vec<f64>> {
        Ok(self.radii_with_pooling(samples, level)?.0)
    }

    fn pole_point(&self, samples: &SampleSet) -> Vector2 {
        match self.pole {
            Pole::LaunchSite => Vector2::zeros(),
            Pole::SampleMean => samples.mean(),
        }
    }

    fn radii_with_pooling(
        &self,
        samples: &SampleSet,
        level: ConfidenceLevel,
    ) -> Result<(Vec<f64>, Vec<usize>)> {
        if samples.size() < self.min_sector_count {
            return Err(RegionError::InsufficientData {
                available: samples.size(),
                required: self.min_sector_count,
            });
        }

        let pole = self.pole_point(samples);
        let buckets = self.bucket(samples, &pole);

        let mut radii = Vec::with_capacity(self.sector_count);
        let mut pooled_sectors = Vec::new();
        for s in 0..self.sector_count {
            let (mut pool, half_width) = self.pooled(&buckets, s);
            if half_width > 0 {
                pooled_sectors.push(s);
            }
            sort_ascending(&mut pool);
            radii.push(nearest_rank_sorted(&pool, level.value()));
        }

        Ok((radii, pooled_sectors))
    }

    /// Build the sector polygon at `level`.
    pub fn estimate(&self, samples: &SampleSet, level: ConfidenceLevel) -> Result<RegionReport> {
        let mut warnings = Warnings::new(Method::Directional);

        let (radii, pooled_sectors) = self.radii_with_pooling(samples, level)?;
        if !pooled_sectors.is_empty() {
            warnings.push(
                RegionWarning::SparseSector,
                &format!(
                    "{} of {} sectors had fewer than {} landings and were pooled: {:?}",
                    pooled_sectors.len(),
                    self.sector_count,
                    self.min_sector_count,
                    pooled_sectors
                ),
            );
        }
        if let Err(err) = samples.precision() {
            warnings.push(RegionWarning::DegenerateSample, &err.to_string());
        }

        let pole = self.pole_point(samples);
        let width = self.sector_width();
        let stretch = 1.0 / (width / 2.0).cos();

        let mut vertices: Vec<Vector2> = Vec::with_capacity(2 * self.sector_count);
        for (s, &r) in radii.iter().enumerate() {
            let rho = r * stretch;
            // The last sector closes on the ray at 0, not at 2π
            let end = (s + 1) % self.sector_count;
            for theta in [s as f64 * width, end as f64 * width] {
                let v = pole + Vector2::new(rho * theta.cos(), rho * theta.sin());
                if vertices.last() != Some(&v) {
                    vertices.push(v);
                }
            }
        }
        let same = |a: &Vector2, b: &Vector2| (a - b).norm() <= 1e-12 * a.norm().max(1.0);
        // Consecutive sectors with equal radii still leave a near-duplicate
        // vertex when cos/sin of the shared ray round differently
        vertices.dedup_by(|a, b| same(a, b));
        while vertices.len() > 1 && same(&vertices[0], &vertices[vertices.len() - 1]) {
            vertices.pop();
        }

        if vertices.len() < 3 {
            warnings.push(
                RegionWarning::DegenerateSample,
                &format!("sector polygon has only {} distinct vertices", vertices.len()),
            );
        }

        tracing::debug!(
            level = level.value(),
            sectors = self.sector_count,
            pooled = pooled_sectors.len(),
            max_radius = radii.iter().copied().fold(0.0, f64::max),
            "directional region resolved"
        );

        let region = Region::Polygon(Polygon::from_points(&vertices));
        let points: Vec<Vector2> = samples.observations().iter().map(|o| o.to_vector()).collect();
        let coverage = region.coverage_of(points.iter());
        warnings.check_coverage(coverage, level, self.coverage_tolerance);

        let mean = samples.mean();
        Ok(RegionReport {
            method: Method::Directional,
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
