//! JSON serialization for region reports.

use crate::result::RegionReport;

/// Serialize a RegionReport to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RegionReport).
pub fn to_json(report: &RegionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a RegionReport to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RegionReport).
pub fn to_json_pretty(report: &RegionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Parse a RegionReport previously written by [`to_json`] or [`to_json_pretty`].
///
/// # Errors
///
/// Returns an error for malformed JSON or unknown method/region/warning tags.
pub fn from_json(json: &str) -> Result<RegionReport, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Ellipse, Method, Polygon, Region, RegionWarning};

    fn make_ellipse_report() -> RegionReport {
        RegionReport {
            method: Method::Parametric,
            level: 0.95,
            sample_size: 5,
            region: Region::Ellipse(Ellipse {
                center: [5.0, 5.0],
                semi_major: 12.239_121_104_6,
                semi_minor: 0.1 + 0.2,
                angle: -0.785_398_163_397_448_3,
            }),
            warnings: vec![RegionWarning::ExtremeQuantile],
            coverage: 1.0,
            mean: [5.0, 5.0],
            seed: None,
        }
    }

    fn make_polygon_report() -> RegionReport {
        RegionReport {
            method: Method::Directional,
            level: 0.995,
            sample_size: 120,
            region: Region::Polygon(Polygon {
                vertices: vec![[1.0 / 3.0, 0.0], [2.5, 1e-300], [-7.25, 3.0e8]],
            }),
            warnings: vec![RegionWarning::SparseSector, RegionWarning::CoverageShortfall],
            coverage: 0.87,
            mean: [0.1, -0.2],
            seed: Some(u64::MAX),
        }
    }

    #[test]
    fn test_to_json_shape() {
        let json = to_json(&make_ellipse_report()).unwrap();
        assert!(json.contains("\"method\":\"parametric\""));
        assert!(json.contains("\"kind\":\"ellipse\""));
        assert!(json.contains("\"sample_size\":5"));
        assert!(json.contains("\"warnings\":[\"extreme-quantile\"]"));
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json_pretty(&make_polygon_report()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"polygon\""));
    }

    #[test]
    fn test_ellipse_round_trip_is_exact() {
        let report = make_ellipse_report();
        let back = from_json(&to_json(&report).unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_polygon_round_trip_is_exact() {
        let report = make_polygon_report();
        let back = from_json(&to_json_pretty(&report).unwrap()).unwrap();
        assert_eq!(back.region, report.region);
        assert_eq!(back, report);
    }

    #[test]
    fn test_unknown_warning_rejected() {
        let json = to_json(&make_ellipse_report())
            .unwrap()
            .replace("extreme-quantile", "mystery");
        assert!(from_json(&json).is_err());
    }
}
