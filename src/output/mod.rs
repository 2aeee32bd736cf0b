//! Output formatting for region reports.

pub mod json;
pub mod terminal;

pub use json::{from_json, to_json, to_json_pretty};
pub use terminal::format_report;
