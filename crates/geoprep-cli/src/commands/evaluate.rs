//! The `geoprep evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use geoprep_core::evaluation::{ScoreBand, MAX_DIMENSION_SCORE, MAX_TOTAL_SCORE};
use geoprep_core::lab::{self, EvaluationForm, Trend};
use geoprep_core::model::{EvaluationModule, EvaluationResult};

use super::{AppContext, Paths};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    paths: &Paths,
    username: String,
    password: String,
    module: EvaluationModule,
    topic: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    answer_file: Option<PathBuf>,
) -> Result<()> {
    let answer = match (answer, answer_file) {
        (Some(answer), _) => answer,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read answer file: {}", path.display()))?,
        (None, None) => anyhow::bail!("provide --answer or --answer-file"),
    };

    let ctx = AppContext::load(paths)?;
    let user = ctx.login_student(username, password)?;
    let gateway = ctx.gateway()?;

    let defaults = EvaluationForm::default();
    let form = EvaluationForm {
        module,
        topic: topic.unwrap_or(defaults.topic),
        question: question.unwrap_or(defaults.question),
        answer,
    };

    println!(
        "Evaluating {} answer on {} with {}...",
        form.module,
        form.topic,
        gateway.provider_name()
    );
    let outcome = lab::submit(
        &gateway,
        &ctx.directory(),
        &ctx.logbook(),
        &user.username,
        form,
    )
    .await?;

    print_result(module, &outcome.result);
    print_trend(&outcome.trend);
    Ok(())
}

fn print_result(module: EvaluationModule, result: &EvaluationResult) {
    let feedback = &result.user_feedback;
    println!(
        "\nScore: {:.0}/{:.0} ({})",
        feedback.score_total,
        MAX_TOTAL_SCORE,
        ScoreBand::of(feedback.score_total)
    );
    println!("Framework: {}", module.framework());

    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Score"]);
    for (label, score) in module
        .dimension_labels()
        .iter()
        .zip(feedback.framework_scores.as_array())
    {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{score:.0}/{MAX_DIMENSION_SCORE:.0}")),
        ]);
    }
    println!("{table}");

    if !feedback.constructive_comment.is_empty() {
        println!("\nFeedback: {}", feedback.constructive_comment);
    }

    let analytics = &result.admin_analytics;
    let tag = |t: Option<String>| t.unwrap_or_else(|| "-".to_string());
    println!(
        "Archetype: {} | Error: {} | Cognitive level: {}",
        tag(analytics.candidate_archetype.as_ref().map(|a| a.to_string())),
        tag(analytics.error_category.as_ref().map(|e| e.to_string())),
        tag(analytics.cognitive_level.as_ref().map(|c| c.to_string())),
    );
}

pub(crate) fn print_trend(trend: &Trend) {
    if !trend.is_displayable() {
        return;
    }
    let points = trend.recent();
    let scores: Vec<String> = points
        .iter()
        .map(|p| format!("{:.0} ({})", p.score, p.band))
        .collect();
    println!(
        "\nReadiness trend (last {}): {}",
        points.len(),
        scores.join(" -> ")
    );
}
