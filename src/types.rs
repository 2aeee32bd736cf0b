//! Type aliases and common types.

use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

/// 2x2 covariance matrix of landing offsets.
pub type Matrix2 = SMatrix<f64, 2, 2>;

/// 2-dimensional vector (offset, mean, eigenvector).
pub type Vector2 = SVector<f64, 2>;

/// A single landing offset from the launch site.
///
/// `dx` is measured downrange and `dy` crossrange in a fixed local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Downrange offset.
    pub dx: f64,
    /// Crossrange offset.
    pub dy: f64,
}

impl Observation {
    /// Create an observation from its two components.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// The offset as a column vector.
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(self.dx, self.dy)
    }

    /// Bearing of the offset, `atan2(dy, dx)`, in (-π, π].
    pub fn bearing(&self) -> f64 {
        self.dy.atan2(self.dx)
    }

    /// Euclidean distance from the launch site.
    pub fn range(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl From<(f64, f64)> for Observation {
    fn from((dx, dy): (f64, f64)) -> Self {
        Self { dx, dy }
    }
}

impl From<[f64; 2]> for Observation {
    fn from([dx, dy]: [f64; 2]) -> Self {
        Self { dx, dy }
    }
}

impl From<Vector2> for Observation {
    fn from(v: Vector2) -> Self {
        Self { dx: v[0], dy: v[1] }
    }
}
