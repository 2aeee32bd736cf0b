//! Planar geometry for confidence regions.
//!
//! Containment tests accept points lying on the boundary within a small
//! tolerance scaled to the region size: regions are built so that the
//! quantile observation sits exactly on the boundary.

use crate::types::Vector2;

/// Relative tolerance used by containment tests.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// z-component of (b - a) × (c - a). Positive for a left turn.
pub fn cross(a: &Vector2, b: &Vector2, c: &Vector2) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Convex hull by Andrew's monotone chain.
///
/// Returns hull vertices counter-clockwise, starting from the lowest-x
/// (then lowest-y) point, with collinear boundary points removed. Fewer
/// than 3 vertices come back for degenerate input: one point when all
/// inputs coincide, two for collinear input.
pub fn convex_hull(points: &[Vector2]) -> Vec<Vector2> {
    let mut pts: Vec<Vector2> = points.to_vec();
    pts.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Vector2> = Vec::with_capacity(2 * pts.len());

    // Lower hull
    for p in &pts {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }

    // Upper hull
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    // Last point repeats the first
    hull.pop();
    hull
}

/// Signed shoelace area; positive for counter-clockwise vertices.
pub fn signed_area(vertices: &[Vector2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = &vertices[i];
            let b = &vertices[(i + 1) % n];
            a[0] * b[1] - b[0] * a[1]
        })
        .sum();
    twice / 2.0
}

/// Largest coordinate magnitude, used to scale tolerances.
fn extent(vertices: &[Vector2]) -> f64 {
    vertices
        .iter()
        .map(|v| v[0].abs().max(v[1].abs()))
        .fold(1.0, f64::max)
}

/// Distance from `p` to the segment `a`-`b`.
pub fn segment_distance(p: &Vector2, a: &Vector2, b: &Vector2) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Whether `p` lies inside or on the closed polygon `vertices`.
///
/// Works for any simple polygon. Polygons with one or two vertices are
/// treated as a point or a segment.
pub fn polygon_contains(vertices: &[Vector2], p: &Vector2) -> bool {
    if vertices.is_empty() {
        return false;
    }

    let tol = BOUNDARY_TOLERANCE * extent(vertices).max(p[0].abs()).max(p[1].abs());
    let n = vertices.len();

    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        if segment_distance(p, a, b) <= tol {
            return true;
        }
    }

    if n < 3 {
        return false;
    }

    // Even-odd ray casting toward +x
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (&vertices[i], &vertices[j]);
        if (vi[1] > p[1]) != (vj[1] > p[1]) {
            let x_cross = vj[0] + (p[1] - vj[1]) / (vi[1] - vj[1]) * (vi[0] - vj[0]);
            if p[0] < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `p` lies inside or on the ellipse.
///
/// A zero-width ellipse (`semi_minor == 0`) is the segment along the
/// major axis.
pub fn ellipse_contains(
    center: &Vector2,
    semi_major: f64,
    semi_minor: f64,
    angle: f64,
    p: &Vector2,
) -> bool {
    let (sin, cos) = angle.sin_cos();
    let d = p - center;
    // Coordinates in the ellipse frame
    let u = d[0] * cos + d[1] * sin;
    let v = -d[0] * sin + d[1] * cos;

    let tol = BOUNDARY_TOLERANCE * semi_major.max(center[0].abs()).max(center[1].abs()).max(1.0);

    if semi_minor <= 0.0 {
        return v.abs() <= tol && u.abs() <= semi_major + tol;
    }

    let a = semi_major + tol;
    let b = semi_minor + tol;
    (u / a).powi(2) + (v / b).powi(2) <= 1.0
}

/// Points on the ellipse boundary, counter-clockwise, `count` of them.
pub fn ellipse_boundary(
    center: &Vector2,
    semi_major: f64,
    semi_minor: f64,
    angle: f64,
    count: usize,
) -> Vec<Vector2> {
    let (sin, cos) = angle.sin_cos();
    (0..count)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / count as f64;
            let (u, v) = (semi_major * t.cos(), semi_minor * t.sin());
            Vector2::new(center[0] + u * cos - v * sin, center[1] + u * sin + v * cos)
        })
        .collect()
}

/// Angle reduced into [0, 2π).
pub fn normalize_angle(theta: f64) -> f64 {
    let r = theta.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if r >= std::f64::consts::TAU {
        0.0
    } else {
        r
    }
}
