//! The evaluation lab: grade an answer, log it, and report the trend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::evaluation::ScoreBand;
use crate::gateway::Gateway;
use crate::model::{EvaluationModule, EvaluationResult, LogEntry, NewLogEntry};
use crate::prompts::{DEFAULT_QUESTION, DEFAULT_TOPIC};
use crate::storage::{LogBook, UserDirectory};

/// How many recent scores the trend view shows.
pub const TREND_WINDOW: usize = 10;

/// The lab's input form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationForm {
    pub module: EvaluationModule,
    pub topic: String,
    pub question: String,
    pub answer: String,
}

impl Default for EvaluationForm {
    fn default() -> Self {
        Self {
            module: EvaluationModule::InterviewSimulation,
            topic: DEFAULT_TOPIC.to_string(),
            question: DEFAULT_QUESTION.to_string(),
            answer: String::new(),
        }
    }
}

/// One point on a student's readiness trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub score: f64,
    pub band: ScoreBand,
}

/// A student's scores in append order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub scores: Vec<f64>,
}

impl Trend {
    pub fn from_logs(logs: &[LogEntry]) -> Self {
        Self {
            scores: logs.iter().map(LogEntry::score).collect(),
        }
    }

    /// The trend is only meaningful with at least two data points.
    pub fn is_displayable(&self) -> bool {
        self.scores.len() > 1
    }

    /// The last [`TREND_WINDOW`] scores, oldest first.
    pub fn recent(&self) -> Vec<TrendPoint> {
        let skip = self.scores.len().saturating_sub(TREND_WINDOW);
        self.scores[skip..]
            .iter()
            .map(|&score| TrendPoint {
                score,
                band: ScoreBand::of(score),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct LabOutcome {
    pub result: EvaluationResult,
    pub entry: LogEntry,
    pub trend: Trend,
}

/// Grade the form for `student` and append the result to the log book.
///
/// A blank answer is rejected before any model call. Nothing is logged if
/// the model call or parsing fails.
pub async fn submit(
    gateway: &Gateway,
    directory: &UserDirectory<'_>,
    logbook: &LogBook<'_>,
    student: &str,
    form: EvaluationForm,
) -> anyhow::Result<LabOutcome> {
    if form.answer.trim().is_empty() {
        return Err(CoreError::EmptyAnswer.into());
    }

    let profile = directory.profile_of(student);
    let result = gateway
        .evaluate_answer(form.module, &form.topic, &form.question, &form.answer, profile)
        .await?;

    let entry = logbook.save(NewLogEntry {
        student: student.to_string(),
        topic: form.topic,
        question: form.question,
        module: form.module,
        result: result.clone(),
    })?;

    let trend = trend(logbook, student)?;
    Ok(LabOutcome {
        result,
        entry,
        trend,
    })
}

pub fn trend(logbook: &LogBook<'_>, student: &str) -> Result<Trend, CoreError> {
    Ok(Trend::from_logs(&logbook.student_logs(student)?))
}
