//! Statistical properties of the estimators on synthetic landing data.

use rand::SeedableRng;
use rand_distr::{Distribution, Exp, StandardNormal};
use rand_xoshiro::Xoshiro256PlusPlus;

use landing_region::{LandingAnalyzer, Method, Region, RegionWarning, SampleSet, Vector2};

/// Draw from N(mean, Σ) with Σ = L·Lᵀ, L = [[l11, 0], [l21, l22]].
fn bivariate_normal(n: usize, seed: u64, mean: (f64, f64), l: (f64, f64, f64)) -> Vec<(f64, f64)> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let z1: f64 = StandardNormal.sample(&mut rng);
            let z2: f64 = StandardNormal.sample(&mut rng);
            (mean.0 + l.0 * z1, mean.1 + l.1 * z1 + l.2 * z2)
        })
        .collect()
}

/// Landings drifting downrange with an exponential tail toward +x.
fn skewed_landings(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let tail = Exp::new(0.1).unwrap();
    (0..n)
        .map(|_| {
            let x: f64 = 20.0 + tail.sample(&mut rng);
            let noise: f64 = StandardNormal.sample(&mut rng);
            (x, 3.0 * noise)
        })
        .collect()
}

fn vertices(region: &Region) -> Vec<Vector2> {
    match region {
        Region::Polygon(p) => p.points(),
        Region::Ellipse(e) => landing_region::geometry::ellipse_boundary(
            &Vector2::from(e.center),
            e.semi_major,
            e.semi_minor,
            e.angle,
            64,
        ),
    }
}

fn assert_nested(inner: &Region, outer: &Region) {
    for v in vertices(inner) {
        assert!(outer.contains(&v), "vertex {v:?} escapes the larger region");
    }
    assert!(inner.area() <= outer.area() * (1.0 + 1e-9));
}

#[test]
fn regions_grow_with_level() {
    let samples = SampleSet::new(skewed_landings(400, 3)).unwrap();
    let analyzer = LandingAnalyzer::new().seed(77).bootstrap_iterations(800);
    let levels = [0.5, 0.8, 0.95, 0.995];

    for method in [Method::Parametric, Method::Empirical, Method::Directional] {
        let reports = analyzer.estimate_levels(method, &samples, &levels).unwrap();
        assert_eq!(reports.len(), levels.len());
        for pair in reports.windows(2) {
            assert_nested(&pair[0].region, &pair[1].region);
        }
    }
}

#[test]
fn parametric_growth_near_one_is_bounded() {
    let samples = SampleSet::new(bivariate_normal(200, 8, (0.0, 0.0), (2.0, 0.5, 1.0))).unwrap();
    let analyzer = LandingAnalyzer::new();

    let mut prev_area = 0.0;
    for level in [0.9, 0.99, 0.999_999, 1.0 - 1e-12, 1.0 - 1e-15, 1.0 - f64::EPSILON / 2.0] {
        let report = analyzer.estimate_samples(Method::Parametric, &samples, level).unwrap();
        let area = report.region.area();
        assert!(area.is_finite());
        assert!(area >= prev_area);
        prev_area = area;

        // k = -2·ln(1-level) > 50 once 1-level < e^-25
        let extreme = -2.0 * (1.0 - level).ln() > 50.0;
        assert_eq!(report.has_warning(RegionWarning::ExtremeQuantile), extreme, "level {level}");
    }
}

#[test]
fn parametric_coverage_law() {
    let mean = (120.0, -35.0);
    let l = (15.0, 6.0, 4.0);
    let training = SampleSet::new(bivariate_normal(10_000, 1, mean, l)).unwrap();
    let held_out: Vec<Vector2> = bivariate_normal(10_000, 2, mean, l)
        .into_iter()
        .map(|(x, y)| Vector2::new(x, y))
        .collect();

    for level in [0.95, 0.995] {
        let report = LandingAnalyzer::new()
            .estimate_samples(Method::Parametric, &training, level)
            .unwrap();
        let coverage = report.region.coverage_of(held_out.iter());
        assert!(
            coverage >= level - 0.02,
            "held-out coverage {coverage} below {level} - 0.02"
        );
        assert!(!report.has_warning(RegionWarning::CoverageShortfall));
    }
}

#[test]
fn directional_region_follows_skew() {
    let samples = SampleSet::new(skewed_landings(600, 11)).unwrap();
    let report = LandingAnalyzer::new()
        .pole(landing_region::Pole::SampleMean)
        .estimate_samples(Method::Directional, &samples, 0.95)
        .unwrap();

    let mean = samples.mean();
    let pts = report.region.as_polygon().unwrap().points();
    let reach_plus = pts.iter().map(|p| p[0] - mean[0]).fold(f64::MIN, f64::max);
    let reach_minus = pts.iter().map(|p| mean[0] - p[0]).fold(f64::MIN, f64::max);

    // The exponential tail stretches the region downrange
    assert!(reach_plus > 1.5 * reach_minus, "+x {reach_plus}, -x {reach_minus}");
    assert!(report.coverage >= 0.9);
}

#[test]
fn empirical_region_is_reproducible_and_covers() {
    let samples = SampleSet::new(skewed_landings(300, 5)).unwrap();
    let analyzer = LandingAnalyzer::new().seed(2024).bootstrap_iterations(1000);

    let a = analyzer.estimate_samples(Method::Empirical, &samples, 0.95).unwrap();
    let b = analyzer.estimate_samples(Method::Empirical, &samples, 0.95).unwrap();
    assert_eq!(a.region, b.region);
    assert!(a.coverage >= 0.95);
    assert!(a.region.contains(&samples.mean()));
}
