//! End-to-end integration tests.

use landing_region::output::{from_json, to_json};
use landing_region::{
    estimate, LandingAnalyzer, Method, Observation, Region, RegionError, RegionWarning, SampleSet,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn square_with_center() -> Vec<(f64, f64)> {
    vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0), (5.0, 5.0)]
}

/// Five-point scenario: mean (5,5), Σ = 25·I, k = -2·ln(0.05).
#[test]
fn parametric_square_scenario() {
    init_tracing();
    let report = estimate(square_with_center(), Method::Parametric, 0.95).unwrap();

    assert_eq!(report.method, Method::Parametric);
    assert_eq!(report.sample_size, 5);
    assert!((report.mean[0] - 5.0).abs() < 1e-12);
    assert!((report.mean[1] - 5.0).abs() < 1e-12);

    let ellipse = report.region.as_ellipse().expect("parametric yields an ellipse");
    let k = -2.0 * (0.05f64).ln();
    assert!((k - 5.99).abs() < 0.01);

    // Σ is isotropic, so both semi-axes equal sqrt(k·25) whatever the angle
    let expected = (k * 25.0).sqrt();
    assert!((ellipse.semi_major - expected).abs() < 1e-9);
    assert!((ellipse.semi_minor - expected).abs() < 1e-9);
    assert!((ellipse.center[0] - 5.0).abs() < 1e-12);
    assert!((ellipse.center[1] - 5.0).abs() < 1e-12);
    assert!(ellipse.angle > -std::f64::consts::FRAC_PI_2);
    assert!(ellipse.angle <= std::f64::consts::FRAC_PI_2);
}

/// Correlated version of the scenario: axes land on the diagonals.
#[test]
fn parametric_axes_follow_eigenvectors() {
    let points = vec![(0.0, 0.0), (10.0, 10.0), (2.0, 3.0), (8.0, 7.0), (5.0, 5.0)];
    let report = estimate(points, Method::Parametric, 0.95).unwrap();
    let ellipse = report.region.as_ellipse().unwrap();

    assert!((ellipse.angle - std::f64::consts::FRAC_PI_4).abs() < 0.05);
    assert!(ellipse.semi_major > ellipse.semi_minor);
    assert!(ellipse.semi_minor > 0.0);
}

#[test]
fn identical_points_give_degenerate_ellipse() {
    let report = estimate([(5.0, 5.0), (5.0, 5.0)], Method::Parametric, 0.95).unwrap();
    let ellipse = report.region.as_ellipse().unwrap();

    assert_eq!(ellipse.semi_minor, 0.0);
    assert!(ellipse.is_degenerate());
    assert!(report.has_warning(RegionWarning::CollinearSample));
    assert!(report.region.contains_observation(&Observation::new(5.0, 5.0)));
}

#[test]
fn level_one_is_invalid() {
    for method in [Method::Parametric, Method::Empirical, Method::Directional] {
        let err = estimate(square_with_center(), method, 1.0).unwrap_err();
        assert_eq!(err, RegionError::InvalidLevel(1.0));
    }
    assert!(matches!(
        estimate(square_with_center(), Method::Parametric, 0.0),
        Err(RegionError::InvalidLevel(_))
    ));
}

#[test]
fn single_observation_is_insufficient() {
    let err = estimate([(3.0, 4.0)], Method::Parametric, 0.95).unwrap_err();
    assert_eq!(
        err,
        RegionError::InsufficientData {
            available: 1,
            required: 2
        }
    );
}

#[test]
fn non_finite_observation_reports_index() {
    let err = estimate(
        [(0.0, 0.0), (1.0, 1.0), (2.0, f64::INFINITY)],
        Method::Parametric,
        0.95,
    )
    .unwrap_err();
    assert!(matches!(err, RegionError::InvalidObservation { index: 2, .. }));
    assert!(err.to_string().contains("observation 2"));
}

#[test]
fn empirical_and_directional_tolerate_collinear_samples() {
    let line: Vec<(f64, f64)> = (0..30).map(|i| (i as f64, 2.0 * i as f64)).collect();

    let empirical = LandingAnalyzer::new()
        .seed(5)
        .estimate(Method::Empirical, line.clone(), 0.95)
        .unwrap();
    assert!(empirical.has_warning(RegionWarning::DegenerateSample));

    let directional = LandingAnalyzer::new()
        .estimate(Method::Directional, line, 0.95)
        .unwrap();
    assert!(directional.has_warning(RegionWarning::DegenerateSample));
}

#[test]
fn reports_round_trip_through_json() {
    let samples = SampleSet::new(
        (0..40).map(|i| ((i as f64 * 0.7).sin() * 10.0 + i as f64 * 0.3, (i as f64 * 1.3).cos() * 4.0)),
    )
    .unwrap();
    let analyzer = LandingAnalyzer::new().seed(21).bootstrap_iterations(300);

    for method in [Method::Parametric, Method::Empirical, Method::Directional] {
        let report = analyzer.estimate_samples(method, &samples, 0.95).unwrap();
        let json = to_json(&report).unwrap();
        let back = from_json(&json).unwrap();

        match (&report.region, &back.region) {
            (Region::Ellipse(a), Region::Ellipse(b)) => {
                assert_eq!(a.center, b.center);
                assert_eq!(a.semi_major, b.semi_major);
                assert_eq!(a.semi_minor, b.semi_minor);
                assert_eq!(a.angle, b.angle);
            }
            (Region::Polygon(a), Region::Polygon(b)) => {
                assert_eq!(a.vertices.len(), b.vertices.len());
                for (va, vb) in a.vertices.iter().zip(&b.vertices) {
                    assert_eq!(va, vb);
                }
            }
            _ => panic!("region kind changed in round trip"),
        }
        assert_eq!(back, report);
    }
}

#[test]
fn report_json_has_documented_keys() {
    let report = estimate(square_with_center(), Method::Parametric, 0.95).unwrap();
    let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

    assert_eq!(value["method"], "parametric");
    assert_eq!(value["level"], 0.95);
    assert_eq!(value["sample_size"], 5);
    assert_eq!(value["region"]["kind"], "ellipse");
    assert!(value["warnings"].is_array());
}

#[test]
fn seeded_empirical_is_reproducible() {
    let points: Vec<(f64, f64)> = (0..50).map(|i| ((i * 7 % 13) as f64, (i * 3 % 11) as f64)).collect();
    let analyzer = LandingAnalyzer::quick().seed(1234);

    let a = analyzer.estimate(Method::Empirical, points.clone(), 0.95).unwrap();
    let b = analyzer.estimate(Method::Empirical, points, 0.95).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.seed, Some(1234));
}
