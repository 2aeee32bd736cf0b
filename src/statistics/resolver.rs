//! Mapping from a requested confidence level to estimator thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{RegionError, Result};

use super::quantile::nearest_rank_index;

/// Degrees of freedom of the chi-square distribution used for 2-D offsets.
pub const DEGREES_OF_FREEDOM: usize = 2;

/// A confidence level strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Validate and wrap a level.
    ///
    /// NaN, values ≤ 0 and values ≥ 1 are rejected with
    /// [`RegionError::InvalidLevel`].
    pub fn new(level: f64) -> Result<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(RegionError::InvalidLevel(level))
        }
    }

    /// The wrapped probability.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Complementary tail probability, `1 - level`.
    pub fn alpha(self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RegionError;

    fn try_from(level: f64) -> Result<Self> {
        Self::new(level)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

/// Chi-square quantile together with its sanity verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareQuantile {
    /// k such that P(χ²₂ ≤ k) = level.
    pub value: f64,
    /// Whether `value` exceeded the resolver's sanity bound.
    pub exceeds_bound: bool,
}

/// Resolves confidence levels into the thresholds each estimator needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceResolver {
    sanity_bound: f64,
}

impl Default for ConfidenceResolver {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl ConfidenceResolver {
    /// Create a resolver that flags chi-square quantiles above `sanity_bound`.
    pub fn new(sanity_bound: f64) -> Self {
        Self { sanity_bound }
    }

    /// The configured sanity bound.
    pub fn sanity_bound(&self) -> f64 {
        self.sanity_bound
    }

    /// Chi-square quantile for 2 degrees of freedom.
    ///
    /// The CDF is `1 - exp(-k/2)`, so `k = -2·ln(1 - level)`. `ln_1p` keeps
    /// precision for small levels; near 1 the result grows without bound
    /// but stays finite for every representable level below 1 (at most
    /// about 73.7).
    pub fn chi_square_quantile(&self, level: ConfidenceLevel) -> ChiSquareQuantile {
        let value = -2.0 * (-level.value()).ln_1p();
        ChiSquareQuantile {
            value,
            exceeds_bound: value > self.sanity_bound,
        }
    }

    /// Nearest-rank index into `count` ascending statistics for `level`.
    ///
    /// Ties resolve toward the larger index, i.e. the larger region.
    pub fn empirical_quantile_index(&self, level: ConfidenceLevel, count: usize) -> usize {
        nearest_rank_index(level.value(), count)
    }
}
