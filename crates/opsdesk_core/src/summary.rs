//! Aggregate counts and means for dashboard display.
//!
//! # Invariants
//! - Summaries are pure functions of the rows they are given.
//! - Empty inputs yield zero counts and `None` means; nothing divides by zero.
//! - Means are rounded to two decimals.

use crate::model::incident::{Incident, IncidentStatus};
use crate::model::survey::{SatisfactionResponse, Score};
use crate::model::task::{Task, TaskStatus};
use serde::Serialize;

/// Incident counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncidentSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl IncidentSummary {
    pub fn from_incidents<'a>(incidents: impl IntoIterator<Item = &'a Incident>) -> Self {
        let mut summary = Self::default();
        for incident in incidents {
            summary.total += 1;
            match incident.status {
                IncidentStatus::Pending => summary.pending += 1,
                IncidentStatus::InProgress => summary.in_progress += 1,
                IncidentStatus::Done => summary.done += 1,
            }
        }
        summary
    }
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub finished: usize,
}

impl TaskSummary {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            summary.total += 1;
            match task.status {
                TaskStatus::Pending => summary.pending += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Finished => summary.finished += 1,
            }
        }
        summary
    }
}

/// Mean of each score column. `None` when the column has no values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreMeans {
    pub design: Option<f64>,
    pub speed: Option<f64>,
    pub clarity: Option<f64>,
    pub overall: Option<f64>,
}

/// Satisfaction response count and score means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SatisfactionSummary {
    pub total: usize,
    /// `None` when there are no responses.
    pub means: Option<ScoreMeans>,
}

impl SatisfactionSummary {
    pub fn from_responses<'a>(
        responses: impl IntoIterator<Item = &'a SatisfactionResponse>,
    ) -> Self {
        let responses: Vec<&SatisfactionResponse> = responses.into_iter().collect();
        if responses.is_empty() {
            return Self::default();
        }

        let column_mean = |score: fn(&SatisfactionResponse) -> Option<Score>| {
            mean(responses.iter().filter_map(|response| score(response)))
        };

        Self {
            total: responses.len(),
            means: Some(ScoreMeans {
                design: column_mean(|response| response.design_score),
                speed: column_mean(|response| response.speed_score),
                clarity: column_mean(|response| response.clarity_score),
                overall: column_mean(|response| response.overall_score),
            }),
        }
    }
}

/// Combined incident and satisfaction view ("error rate" dashboard).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dashboard {
    pub incidents: IncidentSummary,
    pub satisfaction: SatisfactionSummary,
}

fn mean(scores: impl Iterator<Item = Score>) -> Option<f64> {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), score| {
        (sum + u64::from(score.get()), count + 1)
    });
    if count == 0 {
        return None;
    }
    Some(round2(sum as f64 / count as f64))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
