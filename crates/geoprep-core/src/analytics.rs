//! Dashboard aggregation over the full evaluation log.
//!
//! Everything here is a pure function of the log list and is recomputed on
//! every call. The lists are small, so nothing is cached or indexed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{CognitiveLevel, ErrorCategory, LogEntry};

/// Number of entries shown in the recent-activity table.
pub const RECENT_ACTIVITY: usize = 10;

/// Label used for a missing archetype tag.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Placeholder for the top error when no errors were recorded.
pub const NO_DATA: &str = "No Data";

/// A category with its count and whole-number share of all evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub percent: u32,
}

/// One bar of the cognitive-level chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBar {
    pub level: String,
    pub count: usize,
    /// Height relative to the tallest bar, 0–100.
    pub height: f64,
}

/// Nearest-rank score percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePercentiles {
    pub p25: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_evaluations: usize,
    pub average_score: f64,
    pub archetypes: Vec<CategoryShare>,
    /// Error categories other than `None`, most frequent first.
    pub errors: Vec<CategoryShare>,
    pub top_error: String,
    pub cognitive_levels: Vec<LevelBar>,
    /// topic -> error category -> count, excluding `None`.
    pub topic_errors: BTreeMap<String, BTreeMap<String, usize>>,
    pub topic_averages: BTreeMap<String, f64>,
    pub module_averages: BTreeMap<String, f64>,
    pub percentiles: Option<ScorePercentiles>,
    /// Newest first.
    pub recent: Vec<LogEntry>,
}

impl Dashboard {
    pub fn compute(logs: &[LogEntry]) -> Self {
        let errors = error_counts(logs);
        Self {
            total_evaluations: logs.len(),
            average_score: average_score(logs),
            archetypes: archetype_counts(logs),
            top_error: errors
                .first()
                .map(|e| e.label.clone())
                .unwrap_or_else(|| NO_DATA.to_string()),
            errors,
            cognitive_levels: cognitive_levels(logs),
            topic_errors: topic_errors(logs),
            topic_averages: average_by(logs, |log| log.topic.clone()),
            module_averages: average_by(logs, |log| log.module.to_string()),
            percentiles: score_percentiles(logs),
            recent: recent_activity(logs),
        }
    }
}

/// Mean of `score_total`, or 0.0 for an empty log.
pub fn average_score(logs: &[LogEntry]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    logs.iter().map(LogEntry::score).sum::<f64>() / logs.len() as f64
}

fn shares(counts: BTreeMap<String, usize>, total: usize) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            percent: percent_of(count, total),
            label,
            count,
        })
        .collect();
    // Stable sort keeps alphabetical order among ties.
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Archetype distribution; untagged entries count as "Unknown".
pub fn archetype_counts(logs: &[LogEntry]) -> Vec<CategoryShare> {
    let mut counts = BTreeMap::new();
    for log in logs {
        let label = log
            .result
            .admin_analytics
            .candidate_archetype
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        *counts.entry(label).or_insert(0) += 1;
    }
    shares(counts, logs.len())
}

fn error_label(log: &LogEntry) -> Option<String> {
    match &log.result.admin_analytics.error_category {
        None | Some(ErrorCategory::None) => None,
        Some(category) => Some(category.to_string()),
    }
}

/// Error category counts, skipping strong answers and untagged entries.
pub fn error_counts(logs: &[LogEntry]) -> Vec<CategoryShare> {
    let mut counts = BTreeMap::new();
    for label in logs.iter().filter_map(error_label) {
        *counts.entry(label).or_insert(0) += 1;
    }
    shares(counts, logs.len())
}

/// Counts for the four Bloom levels, in taxonomy order. Unknown levels are
/// ignored.
pub fn cognitive_levels(logs: &[LogEntry]) -> Vec<LevelBar> {
    let counts: Vec<(CognitiveLevel, usize)> = CognitiveLevel::KNOWN
        .iter()
        .map(|level| {
            let count = logs
                .iter()
                .filter(|log| log.result.admin_analytics.cognitive_level.as_ref() == Some(level))
                .count();
            (level.clone(), count)
        })
        .collect();

    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    counts
        .into_iter()
        .map(|(level, count)| LevelBar {
            level: level.to_string(),
            count,
            height: count as f64 / max as f64 * 100.0,
        })
        .collect()
}

pub fn topic_errors(logs: &[LogEntry]) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut heatmap: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for log in logs {
        if let Some(label) = error_label(log) {
            *heatmap
                .entry(log.topic.clone())
                .or_default()
                .entry(label)
                .or_insert(0) += 1;
        }
    }
    heatmap
}

fn average_by(logs: &[LogEntry], key: impl Fn(&LogEntry) -> String) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for log in logs {
        let entry = sums.entry(key(log)).or_insert((0.0, 0));
        entry.0 += log.score();
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

/// Nearest-rank percentile over an ascending-sorted slice.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let rank = ((p / 100.0) * n as f64).ceil() as usize;
    sorted[rank.clamp(1, n) - 1]
}

pub fn score_percentiles(logs: &[LogEntry]) -> Option<ScorePercentiles> {
    if logs.is_empty() {
        return None;
    }
    let mut scores: Vec<f64> = logs.iter().map(LogEntry::score).collect();
    scores.sort_by(|a, b| a.total_cmp(b));
    Some(ScorePercentiles {
        p25: nearest_rank(&scores, 25.0),
        p50: nearest_rank(&scores, 50.0),
        p90: nearest_rank(&scores, 90.0),
    })
}

/// The newest [`RECENT_ACTIVITY`] entries, newest first. Relies on append
/// order rather than timestamps.
pub fn recent_activity(logs: &[LogEntry]) -> Vec<LogEntry> {
    logs.iter().rev().take(RECENT_ACTIVITY).cloned().collect()
}
