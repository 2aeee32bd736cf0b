//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::{Region, RegionReport};

/// Format a RegionReport for human-readable terminal output.
pub fn format_report(report: &RegionReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("landing-region\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!("  Method:  {}\n", report.method));
    output.push_str(&format!("  Level:   {:.1}%\n", report.level * 100.0));
    output.push_str(&format!("  Samples: {}\n", report.sample_size));
    output.push_str(&format!(
        "  Mean:    ({:.2}, {:.2})\n",
        report.mean[0], report.mean[1]
    ));
    if let Some(seed) = report.seed {
        output.push_str(&format!("  Seed:    {}\n", seed));
    }
    output.push('\n');

    match &report.region {
        Region::Ellipse(e) => {
            output.push_str("    Region: ellipse\n");
            output.push_str(&format!(
                "      Center:     ({:.2}, {:.2})\n",
                e.center[0], e.center[1]
            ));
            output.push_str(&format!(
                "      Semi-axes:  {:.2} \u{00d7} {:.2}\n",
                e.semi_major, e.semi_minor
            ));
            output.push_str(&format!(
                "      Major axis: {:.1}\u{00b0}\n",
                e.angle.to_degrees()
            ));
        }
        Region::Polygon(p) => {
            output.push_str(&format!(
                "    Region: polygon ({} vertices)\n",
                p.vertices.len()
            ));
        }
    }
    output.push_str(&format!("      Area:       {:.2}\n", report.region.area()));
    output.push_str(&format!(
        "      Coverage:   {}\n",
        format_coverage(report.coverage, report.level)
    ));
    output.push('\n');

    if report.warnings.is_empty() {
        output.push_str(&format!("  {}\n", "\u{2713} No warnings".green().bold()));
    } else {
        for warning in &report.warnings {
            output.push_str(&format!(
                "  {} {}\n",
                format!("\u{26A0} {}", warning.code()).as_str().yellow().bold(),
                warning.description()
            ));
        }
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');

    output
}

/// Coverage percentage, colored by how it compares to the requested level.
fn format_coverage(coverage: f64, level: f64) -> String {
    let text = format!("{:.1}%", coverage * 100.0);
    if coverage >= level {
        text.as_str().green().to_string()
    } else {
        text.as_str().yellow().to_string()
    }
}
