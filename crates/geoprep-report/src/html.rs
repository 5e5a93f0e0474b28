//! HTML dashboard generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use geoprep_core::analytics::{Dashboard, LevelBar};
use geoprep_core::evaluation::ScoreBand;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn band_class(score: f64) -> String {
    ScoreBand::of(score).to_string()
}

/// Generate the admin dashboard page.
pub fn generate_html(dashboard: &Dashboard, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>HPSC Geo-Prep admin dashboard</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>HPSC Geo-Prep admin dashboard</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary cards
    html.push_str("<section class=\"cards\">\n");
    push_card(
        &mut html,
        "Total evaluations",
        &dashboard.total_evaluations.to_string(),
    );
    push_card(
        &mut html,
        "Average score",
        &format!("{:.1}", dashboard.average_score),
    );
    push_card(&mut html, "Top error", &html_escape(&dashboard.top_error));
    if let Some(p) = &dashboard.percentiles {
        push_card(
            &mut html,
            "P25 / P50 / P90",
            &format!("{:.0} / {:.0} / {:.0}", p.p25, p.p50, p.p90),
        );
    }
    html.push_str("</section>\n");

    if dashboard.total_evaluations == 0 {
        html.push_str("<p class=\"empty\">No evaluations recorded yet.</p>\n");
        html.push_str("</body>\n</html>");
        return html;
    }

    // Archetypes
    html.push_str("<section>\n<h2>Candidate archetypes</h2>\n");
    html.push_str("<table>\n<thead><tr><th>Archetype</th><th>Count</th><th>Share</th></tr></thead>\n<tbody>\n");
    for share in &dashboard.archetypes {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
            html_escape(&share.label),
            share.count,
            share.percent
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    // Cognitive levels
    html.push_str("<section>\n<h2>Cognitive levels</h2>\n");
    html.push_str(&generate_level_chart(&dashboard.cognitive_levels));
    html.push_str("</section>\n");

    // Errors
    html.push_str("<section>\n<h2>Error categories</h2>\n");
    if dashboard.errors.is_empty() {
        html.push_str("<p class=\"empty\">No errors recorded.</p>\n");
    } else {
        html.push_str("<ul class=\"errors\">\n");
        for error in &dashboard.errors {
            html.push_str(&format!(
                "<li><span>{}</span> <strong>{}</strong></li>\n",
                html_escape(&error.label),
                error.count
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    // Topics
    html.push_str("<section>\n<h2>Topics</h2>\n");
    html.push_str("<table>\n<thead><tr><th>Topic</th><th>Average</th><th>Errors</th></tr></thead>\n<tbody>\n");
    for (topic, average) in &dashboard.topic_averages {
        let errors = dashboard
            .topic_errors
            .get(topic)
            .map(|counts| {
                counts
                    .iter()
                    .map(|(category, n)| format!("{} ({n})", html_escape(category)))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{:.1}</td><td>{}</td></tr>\n",
            html_escape(topic),
            band_class(*average),
            average,
            errors
        ));
    }
    html.push_str("</tbody></table>\n");

    html.push_str("<h3>Modules</h3>\n<table>\n<thead><tr><th>Module</th><th>Average</th></tr></thead>\n<tbody>\n");
    for (module, average) in &dashboard.module_averages {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{:.1}</td></tr>\n",
            html_escape(module),
            band_class(*average),
            average
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    // Recent activity
    html.push_str("<section>\n<h2>Recent activity</h2>\n");
    html.push_str("<table>\n<thead><tr><th>Time</th><th>Student</th><th>Topic</th><th>Module</th><th>Score</th><th>Archetype</th></tr></thead>\n<tbody>\n");
    for log in &dashboard.recent {
        let archetype = log
            .result
            .admin_analytics
            .candidate_archetype
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{:.0}</td><td>{}</td></tr>\n",
            log.timestamp.format("%Y-%m-%d %H:%M"),
            html_escape(&log.student),
            html_escape(&log.topic),
            html_escape(&log.module_label()),
            band_class(log.score()),
            log.score(),
            html_escape(&archetype),
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn push_card(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"card\"><div class=\"label\">{label}</div><div class=\"value\">{value}</div></div>\n"
    ));
}

/// Write the dashboard page to a file.
pub fn write_html_report(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let html = generate_html(dashboard, Utc::now());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn generate_level_chart(levels: &[LevelBar]) -> String {
    let bar_width = 60;
    let max_height = 160;
    let padding = 30;
    let label_height = 40;

    let width = levels.len() * (bar_width + padding) + padding;
    let height = max_height + label_height + 20;

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );

    for (i, bar) in levels.iter().enumerate() {
        let x = i * (bar_width + padding) + padding;
        let h = (bar.height / 100.0 * max_height as f64) as usize;
        let y = 20 + max_height - h;

        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{bar_width}\" height=\"{h}\" fill=\"#6366f1\" rx=\"4\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            x + bar_width / 2,
            y.saturating_sub(6).max(12),
            bar.count
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            x + bar_width / 2,
            20 + max_height + 20,
            html_escape(&bar.level)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --strong: #dcfce7; --developing: #fef9c3; --weak: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --strong: #064e3b; --developing: #713f12; --weak: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .empty { color: #6b7280; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; min-width: 10rem; }
.card .label { font-size: 0.8rem; text-transform: uppercase; color: #6b7280; }
.card .value { font-size: 1.6rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.strong { background: var(--strong); }
.developing { background: var(--developing); }
.weak { background: var(--weak); }
ul.errors { list-style: none; padding: 0; }
ul.errors li { display: flex; justify-content: space-between; max-width: 24rem; padding: 0.25rem 0; border-bottom: 1px solid var(--border); }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use geoprep_core::model::{
        CandidateArchetype, CognitiveLevel, ErrorCategory, EvaluationModule, EvaluationResult,
        LogEntry,
    };

    fn make_log(student: &str, score: f64) -> LogEntry {
        let mut result = EvaluationResult::default();
        result.user_feedback.score_total = score;
        result.admin_analytics.candidate_archetype = Some(CandidateArchetype::Academic);
        result.admin_analytics.error_category = Some(ErrorCategory::PedagogicalFailure);
        result.admin_analytics.cognitive_level = Some(CognitiveLevel::Analysis);
        LogEntry {
            id: uuid::Uuid::nil(),
            timestamp: Utc::now(),
            student: student.into(),
            topic: "Climatology".into(),
            question: "Explain Western Disturbances".into(),
            module: EvaluationModule::TeachingDemo,
            result,
        }
    }

    #[test]
    fn html_contains_required_sections() {
        let dashboard = Dashboard::compute(&[make_log("asha", 72.0), make_log("ravi", 48.0)]);
        let html = generate_html(&dashboard, Utc::now());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Total evaluations"));
        assert!(html.contains("Academic"));
        assert!(html.contains("Pedagogical Failure"));
        assert!(html.contains("<svg"));
        assert!(html.contains("TEACHING_DEMO"));
        assert!(html.contains("class=\"strong\">72"));
        assert!(html.contains("class=\"weak\">48"));
    }

    #[test]
    fn student_names_are_escaped() {
        let dashboard = Dashboard::compute(&[make_log("<script>alert(1)</script>", 60.0)]);
        let html = generate_html(&dashboard, Utc::now());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_dashboard_renders_placeholder() {
        let html = generate_html(&Dashboard::compute(&[]), Utc::now());
        assert!(html.contains("No evaluations recorded yet."));
        assert!(html.contains("No Data"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn recent_activity_shows_reported_module() {
        let mut log = make_log("asha", 66.0);
        log.result.admin_analytics.module_used = "Mock Lecture".into();
        let html = generate_html(&Dashboard::compute(&[log]), Utc::now());
        assert!(html.contains("<td>Mock Lecture</td>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dashboard = Dashboard::compute(&[make_log("asha", 72.0)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("dashboard.html");

        write_html_report(&dashboard, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
