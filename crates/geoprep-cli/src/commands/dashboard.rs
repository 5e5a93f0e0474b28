//! The `geoprep dashboard` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{Cell, Table};

use geoprep_core::analytics::Dashboard;
use geoprep_report::{generate_html, generate_json, write_html_report, write_json_report};

use super::{AppContext, Paths};
use crate::DashboardFormat;

pub fn execute(
    paths: &Paths,
    admin_code: String,
    format: DashboardFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let ctx = AppContext::load(paths)?;
    ctx.require_admin(admin_code)?;

    let logs = ctx.logbook().logs()?;
    let dashboard = Dashboard::compute(&logs);

    match (format, output) {
        (DashboardFormat::Text, None) => print_summary(&dashboard),
        (DashboardFormat::Text, Some(path)) => {
            std::fs::write(&path, render_summary(&dashboard))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Dashboard written to: {}", path.display());
        }
        (DashboardFormat::Json, None) => println!("{}", generate_json(&dashboard)?),
        (DashboardFormat::Json, Some(path)) => {
            write_json_report(&dashboard, &path)?;
            println!("Dashboard written to: {}", path.display());
        }
        (DashboardFormat::Html, None) => println!("{}", generate_html(&dashboard, Utc::now())),
        (DashboardFormat::Html, Some(path)) => {
            write_html_report(&dashboard, &path)?;
            println!("Dashboard written to: {}", path.display());
        }
    }
    Ok(())
}

fn print_summary(dashboard: &Dashboard) {
    print!("{}", render_summary(dashboard));
}

fn render_summary(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total evaluations: {}\nAverage score: {:.1}\nTop error: {}\n",
        dashboard.total_evaluations, dashboard.average_score, dashboard.top_error
    ));
    if let Some(p) = &dashboard.percentiles {
        out.push_str(&format!(
            "Percentiles: p25 {:.0} | p50 {:.0} | p90 {:.0}\n",
            p.p25, p.p50, p.p90
        ));
    }
    if dashboard.total_evaluations == 0 {
        return out;
    }

    let mut archetypes = Table::new();
    archetypes.set_header(vec!["Archetype", "Count", "Share"]);
    for share in &dashboard.archetypes {
        archetypes.add_row(vec![
            Cell::new(&share.label),
            Cell::new(share.count),
            Cell::new(format!("{}%", share.percent)),
        ]);
    }
    out.push_str(&format!("\n{archetypes}\n"));

    let mut levels = Table::new();
    levels.set_header(vec!["Cognitive level", "Count", "Bar"]);
    for bar in &dashboard.cognitive_levels {
        levels.add_row(vec![
            Cell::new(&bar.level),
            Cell::new(bar.count),
            Cell::new("#".repeat((bar.height / 5.0).round() as usize)),
        ]);
    }
    out.push_str(&format!("\n{levels}\n"));

    let mut topics = Table::new();
    topics.set_header(vec!["Topic", "Average", "Errors"]);
    for (topic, average) in &dashboard.topic_averages {
        let errors = dashboard
            .topic_errors
            .get(topic)
            .map(|counts| {
                counts
                    .iter()
                    .map(|(category, n)| format!("{category} ({n})"))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "-".to_string());
        topics.add_row(vec![
            Cell::new(topic),
            Cell::new(format!("{average:.1}")),
            Cell::new(errors),
        ]);
    }
    out.push_str(&format!("\n{topics}\n"));

    let mut modules = Table::new();
    modules.set_header(vec!["Module", "Average"]);
    for (module, average) in &dashboard.module_averages {
        modules.add_row(vec![Cell::new(module), Cell::new(format!("{average:.1}"))]);
    }
    out.push_str(&format!("\n{modules}\n"));

    let mut recent = Table::new();
    recent.set_header(vec!["Time", "Student", "Topic", "Module", "Score"]);
    for log in &dashboard.recent {
        recent.add_row(vec![
            Cell::new(log.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(&log.student),
            Cell::new(&log.topic),
            Cell::new(log.module_label()),
            Cell::new(format!("{:.0}", log.score())),
        ]);
    }
    out.push_str(&format!("\nRecent activity\n{recent}\n"));
    out
}
