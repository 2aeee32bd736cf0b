//! Validated landing samples and their summary statistics.

use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{RegionError, Result};
use crate::statistics::WelfordCovariance2;
use crate::types::{Matrix2, Observation, Vector2};

/// Minimum observations for a defined covariance.
pub const MIN_OBSERVATIONS: usize = 2;

/// Observations per partial accumulator.
const ACCUMULATE_CHUNK: usize = 4096;

fn accumulate_chunk(chunk: &[Observation]) -> WelfordCovariance2 {
    chunk.iter().map(|o| o.to_vector()).collect()
}

/// Welford statistics over fixed-size chunks, merged in chunk order.
///
/// The chunking does not depend on the thread count, so parallel and
/// serial builds produce the same bits.
fn accumulate(observations: &[Observation]) -> WelfordCovariance2 {
    #[cfg(feature = "parallel")]
    let partials: Vec<WelfordCovariance2> = if observations.len() > ACCUMULATE_CHUNK {
        crate::thread_pool::install(|| {
            observations
                .par_chunks(ACCUMULATE_CHUNK)
                .map(accumulate_chunk)
                .collect()
        })
    } else {
        vec![accumulate_chunk(observations)]
    };

    #[cfg(not(feature = "parallel"))]
    let partials: Vec<WelfordCovariance2> = observations
        .chunks(ACCUMULATE_CHUNK)
        .map(accumulate_chunk)
        .collect();

    partials
        .iter()
        .fold(WelfordCovariance2::new(), |mut acc, part| {
            acc.merge(part);
            acc
        })
}

/// An immutable, validated collection of landing offsets.
///
/// Mean and unbiased covariance are computed once at construction. To add
/// or remove observations, build a new `SampleSet`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSet {
    observations: Vec<Observation>,
    mean: Vector2,
    covariance: Matrix2,
}

impl SampleSet {
    /// Validate observations and compute their statistics.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidObservation`] for the first observation with
    ///   a non-finite component
    /// - [`RegionError::InsufficientData`] for fewer than 2 observations
    /// - [`RegionError::DegenerateSample`] when the offsets are so large
    ///   that the mean or covariance overflows
    pub fn new<I, O>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<Observation>,
    {
        let observations: Vec<Observation> = observations.into_iter().map(Into::into).collect();

        if let Some((index, bad)) = observations
            .iter()
            .enumerate()
            .find(|(_, o)| !o.is_finite())
        {
            return Err(RegionError::InvalidObservation {
                index,
                dx: bad.dx,
                dy: bad.dy,
            });
        }

        if observations.len() < MIN_OBSERVATIONS {
            return Err(RegionError::InsufficientData {
                available: observations.len(),
                required: MIN_OBSERVATIONS,
            });
        }

        let acc = accumulate(&observations);
        let mean = acc.mean();
        let covariance = acc.covariance();
        if !mean.iter().chain(covariance.iter()).all(|v| v.is_finite()) {
            return Err(RegionError::DegenerateSample(format!(
                "covariance overflowed for {} observations (mean {:?})",
                observations.len(),
                [mean[0], mean[1]]
            )));
        }

        Ok(Self {
            observations,
            mean,
            covariance,
        })
    }

    /// Observations in their original order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations.
    pub fn size(&self) -> usize {
        self.observations.len()
    }

    /// Sample mean μ.
    pub fn mean(&self) -> Vector2 {
        self.mean
    }

    /// Unbiased sample covariance Σ (divides by n−1).
    pub fn covariance(&self) -> Matrix2 {
        self.covariance
    }

    /// Whether every observation coincides, leaving Σ the zero matrix.
    pub fn is_degenerate(&self) -> bool {
        self.covariance.iter().all(|&v| v == 0.0)
    }

    /// Σ⁻¹, the Mahalanobis metric.
    ///
    /// # Errors
    ///
    /// [`RegionError::DegenerateSample`] when Σ is singular.
    pub fn precision(&self) -> Result<Matrix2> {
        let det = self.covariance.determinant();
        let scale = self.covariance.trace().powi(2);
        if !(det > scale * f64::EPSILON) {
            return Err(RegionError::DegenerateSample(format!(
                "covariance determinant {det:e} is not positive"
            )));
        }
        self.covariance.try_inverse().ok_or_else(|| {
            RegionError::DegenerateSample("covariance matrix is not invertible".to_string())
        })
    }
}

/// Squared Mahalanobis distance of `point` from `center` under `precision`.
pub fn mahalanobis_squared(point: &Vector2, center: &Vector2, precision: &Matrix2) -> f64 {
    let d = point - center;
    (d.transpose() * precision * d)[(0, 0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_center() -> SampleSet {
        SampleSet::new([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0), (5.0, 5.0)]).unwrap()
    }

    #[test]
    fn test_mean_and_covariance() {
        let s = square_with_center();
        assert_eq!(s.size(), 5);
        assert!((s.mean() - Vector2::new(5.0, 5.0)).norm() < 1e-12);

        // Sum of squared deviations is 100 per axis, n-1 = 4
        let cov = s.covariance();
        assert!((cov[(0, 0)] - 25.0).abs() < 1e-12);
        assert!((cov[(1, 1)] - 25.0).abs() < 1e-12);
        assert!(cov[(0, 1)].abs() < 1e-12);
        assert!(!s.is_degenerate());
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = SampleSet::new([(0.0, 0.0), (1.0, f64::NAN), (f64::INFINITY, 2.0)]).unwrap_err();
        match err {
            RegionError::InvalidObservation { index, dx, .. } => {
                assert_eq!(index, 1);
                assert_eq!(dx, 1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_single_observation() {
        assert_eq!(
            SampleSet::new([(1.0, 1.0)]),
            Err(RegionError::InsufficientData {
                available: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_huge_offsets_overflow_is_rejected() {
        let err =
            SampleSet::new([(1e160, 1e160), (-1e160, -1e160), (1e160, -1e160)]).unwrap_err();
        match err {
            RegionError::DegenerateSample(msg) => assert!(msg.contains("overflowed")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_large_offsets_below_overflow_are_kept() {
        let s = SampleSet::new([(1e150, 1e150), (-1e150, -1e150), (1e150, -1e150)]).unwrap();
        assert!(s.covariance().iter().all(|v| v.is_finite()));
        assert!(s.covariance()[(0, 0)] > 0.0);
    }

    #[test]
    fn test_chunked_accumulation_matches_single_pass() {
        let pts: Vec<(f64, f64)> = (0..3 * ACCUMULATE_CHUNK + 17)
            .map(|i| {
                let t = i as f64 * 0.013;
                (100.0 + 7.0 * t.sin() + (i % 11) as f64, -40.0 + 3.0 * t.cos())
            })
            .collect();
        let s = SampleSet::new(pts.clone()).unwrap();
        let single: WelfordCovariance2 = pts.iter().map(|&(x, y)| Vector2::new(x, y)).collect();

        assert!((s.mean() - single.mean()).norm() < 1e-9);
        assert!((s.covariance() - single.covariance()).norm() < 1e-9);
        assert_eq!(SampleSet::new(pts).unwrap(), s);
    }

    #[test]
    fn test_identical_points_are_degenerate() {
        let s = SampleSet::new([(5.0, 5.0), (5.0, 5.0)]).unwrap();
        assert!(s.is_degenerate());
        assert_eq!(s.covariance(), Matrix2::zeros());
        assert!(matches!(s.precision(), Err(RegionError::DegenerateSample(_))));
    }

    #[test]
    fn test_collinear_precision_fails() {
        let s = SampleSet::new([(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]).unwrap();
        assert!(!s.is_degenerate());
        assert!(s.precision().is_err());
    }

    #[test]
    fn test_mahalanobis_isotropic() {
        let s = square_with_center();
        let precision = s.precision().unwrap();
        let d2 = mahalanobis_squared(&Vector2::new(10.0, 5.0), &s.mean(), &precision);
        // 5² / 25
        assert!((d2 - 1.0).abs() < 1e-12);
    }
}
