//! Online mean and covariance accumulation for 2-D offsets.
//!
//! Sample statistics are accumulated in a single pass with Welford's
//! algorithm. Large samples are split into fixed-size chunks whose partial
//! accumulators are combined with Chan's parallel merge.

use crate::types::{Matrix2, Vector2};

/// Online mean/covariance accumulator using Welford's algorithm.
///
/// Keeps the running mean and M2 (the sum of outer products of deviations),
/// which converts to the unbiased covariance via M2/(n-1).
#[derive(Debug, Clone, PartialEq)]
pub struct WelfordCovariance2 {
    /// Count of vectors accumulated so far.
    n: usize,
    /// Running mean of vectors.
    mean: Vector2,
    /// Sum of outer products: Σ(x - μ)(x - μ)^T
    m2: Matrix2,
}

impl Default for WelfordCovariance2 {
    fn default() -> Self {
        Self::new()
    }
}

impl WelfordCovariance2 {
    /// Create a new accumulator initialized to zeros.
    pub fn new() -> Self {
        Self {
            n: 0,
            mean: Vector2::zeros(),
            m2: Matrix2::zeros(),
        }
    }

    /// Update the accumulator with a new vector.
    ///
    /// ```text
    /// δ = x - μₙ₋₁
    /// μₙ = μₙ₋₁ + δ/n
    /// δ' = x - μₙ
    /// M2ₙ = M2ₙ₋₁ + δ·δ'^T
    /// ```
    pub fn update(&mut self, x: &Vector2) {
        self.n += 1;
        let n = self.n as f64;

        let delta = x - self.mean;
        self.mean += delta / n;
        let delta2 = x - self.mean;

        self.m2 += delta * delta2.transpose();
    }

    /// Running mean. Zero when nothing has been accumulated.
    pub fn mean(&self) -> Vector2 {
        self.mean
    }

    /// Unbiased sample covariance M2/(n-1).
    ///
    /// Returns the zero matrix for n < 2. The result is explicitly
    /// symmetrized: δ·δ'^T is only symmetric up to rounding.
    pub fn covariance(&self) -> Matrix2 {
        if self.n < 2 {
            return Matrix2::zeros();
        }

        let cov = self.m2 / (self.n - 1) as f64;
        (cov + cov.transpose()) * 0.5
    }

    /// Merge another accumulator into this one using Chan's algorithm.
    ///
    /// ```text
    /// n_AB = n_A + n_B
    /// δ = μ_B - μ_A
    /// μ_AB = (n_A·μ_A + n_B·μ_B) / n_AB
    /// M2_AB = M2_A + M2_B + (n_A·n_B/n_AB)·δ·δ^T
    /// ```
    pub fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = other.clone();
            return;
        }

        let n_a = self.n as f64;
        let n_b = other.n as f64;
        let n_ab = n_a + n_b;

        let delta = other.mean - self.mean;
        self.mean = (self.mean * n_a + other.mean * n_b) / n_ab;

        let correction = delta * delta.transpose() * (n_a * n_b / n_ab);
        self.m2 = self.m2 + other.m2 + correction;

        self.n += other.n;
    }

    /// Number of vectors accumulated.
    pub fn count(&self) -> usize {
        self.n
    }
}

impl FromIterator<Vector2> for WelfordCovariance2 {
    fn from_iter<I: IntoIterator<Item = Vector2>>(iter: I) -> Self {
        let mut acc = Self::new();
        for x in iter {
            acc.update(&x);
        }
        acc
    }
}
