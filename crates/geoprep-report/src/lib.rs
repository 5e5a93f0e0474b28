//! geoprep-report: Export of the admin dashboard.
//!
//! Renders a computed `Dashboard` as a self-contained HTML page or as JSON.

pub mod html;
pub mod json;

pub use html::{generate_html, write_html_report};
pub use json::{generate_json, write_json_report};
