//! JSON export of the dashboard.

use std::path::Path;

use anyhow::{Context, Result};

use geoprep_core::analytics::Dashboard;

pub fn generate_json(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).context("failed to serialize dashboard")
}

/// Write the dashboard as pretty-printed JSON.
pub fn write_json_report(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let json = generate_json(dashboard)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
