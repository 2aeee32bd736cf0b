//! Report types returned by the estimators.

use serde::{Deserialize, Serialize};

use crate::geometry::{ellipse_contains, polygon_contains, signed_area};
use crate::types::{Observation, Vector2};

/// Estimation strategy that produced a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Bivariate-normal ellipse from the sample covariance.
    Parametric,
    /// Depth-ranked bootstrap means, convex hull.
    Empirical,
    /// Per-sector radial quantiles.
    Directional,
}

impl Method {
    /// Stable lowercase name, as used in serialized reports.
    pub fn name(self) -> &'static str {
        match self {
            Method::Parametric => "parametric",
            Method::Empirical => "empirical",
            Method::Directional => "directional",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ellipse given by center, semi-axes and major-axis orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center `[x, y]`.
    pub center: [f64; 2],
    /// Semi-major axis length `a`.
    pub semi_major: f64,
    /// Semi-minor axis length `b`, `0 <= b <= a`.
    pub semi_minor: f64,
    /// Angle of the major axis from +x in radians, in (-π/2, π/2].
    pub angle: f64,
}

impl Ellipse {
    /// Area `π·a·b`.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.semi_major * self.semi_minor
    }

    /// Whether the ellipse collapsed to a segment or a point.
    pub fn is_degenerate(&self) -> bool {
        self.semi_minor <= 0.0
    }

    /// Whether `point` lies inside or on the ellipse.
    pub fn contains(&self, point: &Vector2) -> bool {
        ellipse_contains(
            &Vector2::from(self.center),
            self.semi_major,
            self.semi_minor,
            self.angle,
            point,
        )
    }
}

/// A simple closed polygon with counter-clockwise vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Vertices `[x, y]`; the closing edge back to the first is implied.
    pub vertices: Vec<[f64; 2]>,
}

impl Polygon {
    /// Build from vectors.
    pub fn from_points(points: &[Vector2]) -> Self {
        Self {
            vertices: points.iter().map(|p| [p[0], p[1]]).collect(),
        }
    }

    /// Vertices as vectors.
    pub fn points(&self) -> Vec<Vector2> {
        self.vertices.iter().map(|&v| Vector2::from(v)).collect()
    }

    /// Enclosed area (zero for fewer than 3 vertices).
    pub fn area(&self) -> f64 {
        signed_area(&self.points()).abs()
    }

    /// Whether the polygon has fewer than three vertices.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Whether `point` lies inside or on the polygon.
    pub fn contains(&self, point: &Vector2) -> bool {
        polygon_contains(&self.points(), point)
    }
}

/// Geometry of a confidence region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Region {
    /// Produced by the parametric estimator.
    Ellipse(Ellipse),
    /// Produced by the empirical and directional estimators.
    Polygon(Polygon),
}

impl Region {
    /// Enclosed area.
    pub fn area(&self) -> f64 {
        match self {
            Region::Ellipse(e) => e.area(),
            Region::Polygon(p) => p.area(),
        }
    }

    /// Whether `point` lies inside or on the region boundary.
    pub fn contains(&self, point: &Vector2) -> bool {
        match self {
            Region::Ellipse(e) => e.contains(point),
            Region::Polygon(p) => p.contains(point),
        }
    }

    /// Whether an observed landing falls inside the region.
    pub fn contains_observation(&self, observation: &Observation) -> bool {
        self.contains(&observation.to_vector())
    }

    /// Fraction of `points` inside the region. Zero for no points.
    pub fn coverage_of<'a, I>(&self, points: I) -> f64
    where
        I: IntoIterator<Item = &'a Vector2>,
    {
        let (inside, total) = points.into_iter().fold((0usize, 0usize), |(inside, total), p| {
            (inside + usize::from(self.contains(p)), total + 1)
        });
        if total == 0 {
            0.0
        } else {
            inside as f64 / total as f64
        }
    }

    /// The ellipse, if this is one.
    pub fn as_ellipse(&self) -> Option<&Ellipse> {
        match self {
            Region::Ellipse(e) => Some(e),
            Region::Polygon(_) => None,
        }
    }

    /// The polygon, if this is one.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Region::Polygon(p) => Some(p),
            Region::Ellipse(_) => None,
        }
    }
}

/// Numerical degeneracy recovered locally during estimation.
///
/// Serialized as a kebab-case string such as `"collinear-sample"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionWarning {
    /// Σ has (near) rank < 2; the ellipse collapsed to a segment or point.
    CollinearSample,
    /// Σ is singular or the resulting polygon has fewer than 3 vertices.
    DegenerateSample,
    /// The chi-square quantile exceeded the sanity bound.
    ExtremeQuantile,
    /// At least one angular sector pooled its neighbours.
    SparseSector,
    /// Measured coverage fell short of the requested level.
    CoverageShortfall,
}

impl RegionWarning {
    /// Stable identifier, identical to the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            RegionWarning::CollinearSample => "collinear-sample",
            RegionWarning::DegenerateSample => "degenerate-sample",
            RegionWarning::ExtremeQuantile => "extreme-quantile",
            RegionWarning::SparseSector => "sparse-sector",
            RegionWarning::CoverageShortfall => "coverage-shortfall",
        }
    }

    /// Human-readable explanation for end users.
    pub fn description(self) -> &'static str {
        match self {
            RegionWarning::CollinearSample => {
                "Landings are collinear or identical; the ellipse degenerates to a segment."
            }
            RegionWarning::DegenerateSample => {
                "Covariance is singular; the region has no interior or uses a pseudo-inverse metric."
            }
            RegionWarning::ExtremeQuantile => {
                "Requested level is extremely close to 1; the region is very large and ill-conditioned."
            }
            RegionWarning::SparseSector => {
                "Some directions have few landings; adjacent sectors were pooled."
            }
            RegionWarning::CoverageShortfall => {
                "The region encloses noticeably less of the sample than the requested level."
            }
        }
    }
}

impl std::fmt::Display for RegionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Output of a single estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    /// Estimator that produced the region.
    pub method: Method,
    /// Requested confidence level.
    pub level: f64,
    /// Number of observations in the sample.
    pub sample_size: usize,
    /// Region geometry.
    pub region: Region,
    /// Recovered degeneracies, in the order they were detected.
    pub warnings: Vec<RegionWarning>,
    /// Fraction of the construction mass (observations, or bootstrap means
    /// for the empirical method) enclosed by the region.
    pub coverage: f64,
    /// Sample mean `[x, y]`.
    pub mean: [f64; 2],
    /// Base seed of the resampling run, when one took place.
    pub seed: Option<u64>,
}

impl RegionReport {
    /// Whether any warning was attached.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether a specific warning was attached.
    pub fn has_warning(&self, warning: RegionWarning) -> bool {
        self.warnings.contains(&warning)
    }
}
