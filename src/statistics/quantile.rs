//! Nearest-rank quantiles over sorted statistics.
//!
//! All rank-based estimators in this crate use the nearest-rank definition
//! rather than interpolation: the selected value is always one that was
//! actually observed, and ties round toward the larger rank so that regions
//! err on the conservative side.

/// Zero-based index of the nearest-rank quantile at probability `p`.
///
/// The rank is `⌈p·count⌉`, clamped into `1..=count`, and the returned
/// index is `rank - 1`.
///
/// # Panics
///
/// Panics if `count` is zero.
pub fn nearest_rank_index(p: f64, count: usize) -> usize {
    assert!(count > 0, "Cannot take a quantile of an empty collection");

    // Products like 0.7 * 10 land an ulp above the integer rank
    let scaled = p * count as f64;
    let rank = (scaled - scaled.abs() * 4.0 * f64::EPSILON).ceil();
    if !(rank >= 1.0) {
        return 0;
    }
    (rank as usize).min(count) - 1
}

/// Nearest-rank quantile of a slice that is already sorted ascending.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn nearest_rank_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot take a quantile of an empty slice");
    sorted[nearest_rank_index(p, sorted.len())]
}

/// Sort a buffer ascending using IEEE total ordering.
pub fn sort_ascending(data: &mut [f64]) {
    data.sort_unstable_by(|a, b| a.total_cmp(b));
}
