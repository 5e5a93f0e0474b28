//! Parsing and normalizing structured evaluation replies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::EvaluationResult;

pub const MAX_TOTAL_SCORE: f64 = 100.0;
pub const MAX_DIMENSION_SCORE: f64 = 10.0;

/// Pull the JSON object out of a model reply.
///
/// Handles:
/// - ```json``` fenced blocks (first one wins)
/// - Bare ``` fenced blocks (if no json-tagged block found)
/// - Prose around a raw object (outermost `{` .. `}` span)
/// - A clean JSON reply (returned trimmed)
pub fn extract_json_payload(response: &str) -> &str {
    let mut json_block = None;
    let mut generic_block = None;
    let mut open: Option<(usize, Fence)> = None;
    let mut offset = 0;

    for line in response.split_inclusive('\n') {
        let trimmed = line.trim();
        let line_start = offset;
        offset += line.len();

        match open {
            None if trimmed.starts_with("```") => {
                let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
                let fence = match lang.as_str() {
                    "json" => Fence::Json,
                    "" => Fence::Bare,
                    _ => Fence::Other,
                };
                open = Some((offset, fence));
            }
            Some((start, fence)) if trimmed == "```" => {
                open = None;
                let body = &response[start..line_start];
                match fence {
                    Fence::Json if json_block.is_none() => json_block = Some(body),
                    Fence::Bare if generic_block.is_none() => generic_block = Some(body),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    // Truncated (unclosed) fence: take what was accumulated.
    if let Some((start, fence)) = open {
        let body = &response[start..];
        match fence {
            Fence::Json if json_block.is_none() => json_block = Some(body),
            Fence::Bare if generic_block.is_none() => generic_block = Some(body),
            _ => {}
        }
    }

    if let Some(block) = json_block.or(generic_block) {
        return block.trim();
    }

    match (response.find('{'), response.rfind('}')) {
        (Some(open), Some(close)) if open < close => &response[open..=close],
        _ => response.trim(),
    }
}

#[derive(Clone, Copy)]
enum Fence {
    Json,
    Bare,
    Other,
}

/// Parse a model reply into a normalized evaluation result.
pub fn parse_evaluation(response: &str) -> Result<EvaluationResult, CoreError> {
    if response.trim().is_empty() {
        return Err(CoreError::EmptyResponse);
    }
    let payload = extract_json_payload(response);
    let result: EvaluationResult = serde_json::from_str(payload)?;
    Ok(result.normalized())
}

impl EvaluationResult {
    /// Clamp scores into their documented ranges.
    ///
    /// Non-finite values become zero.
    pub fn normalized(mut self) -> Self {
        let feedback = &mut self.user_feedback;
        feedback.score_total = clamp_score(feedback.score_total, MAX_TOTAL_SCORE);
        let dims = &mut feedback.framework_scores;
        dims.dimension_1 = clamp_score(dims.dimension_1, MAX_DIMENSION_SCORE);
        dims.dimension_2 = clamp_score(dims.dimension_2, MAX_DIMENSION_SCORE);
        dims.dimension_3 = clamp_score(dims.dimension_3, MAX_DIMENSION_SCORE);
        self
    }
}

fn clamp_score(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Coarse readiness band used by the trend view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Strong,
    Developing,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Strong
        } else if score >= 50.0 {
            ScoreBand::Developing
        } else {
            ScoreBand::Weak
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Strong => write!(f, "strong"),
            ScoreBand::Developing => write!(f, "developing"),
            ScoreBand::Weak => write!(f, "weak"),
        }
    }
}
