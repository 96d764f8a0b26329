//! Criticality scoring for onboarding tasks.
//!
//! The score is a weighted sum of four contributions plus a flat bonus:
//! - priority: `level * priority_weight` (Critical=4 .. Low=1, absent = Medium)
//! - phase: `(5 - ordinal) * phase_weight`, earlier phases score higher
//! - due-date bucket: `(MAX + 1 - ordinal) * due_date_weight`, nearer buckets score higher
//! - overdue: `overdue_penalty * overdue_weight` when the concrete due date is past
//! - dependency bonus: `dependency_bonus` when the task records any dependency
//!
//! Unknown labels fall back to the least urgent weight on their axis (1 for
//! phase and due-date bucket, the same as Employee Assimilation and Month 6;
//! Low for priority). Scores are relative; callers should only compare them.

use chrono::NaiveDateTime;
use pyo3::prelude::*;

use crate::config::RankingConfig;
use crate::dates::parse_due_date;
use crate::models::{DueDateBucket, Phase, Priority, Task};
use crate::{log_details, log_issues};

/// Urgency of the least urgent known phase and due-date bucket.
const LEAST_URGENT: f64 = 1.0;

/// Per-axis contributions to a task's score, already weighted.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    #[pyo3(get)]
    pub priority: f64,
    #[pyo3(get)]
    pub phase: f64,
    #[pyo3(get)]
    pub due_date: f64,
    #[pyo3(get)]
    pub overdue: f64,
    #[pyo3(get)]
    pub dependency_bonus: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.priority + self.phase + self.due_date + self.overdue + self.dependency_bonus
    }
}

#[pymethods]
impl ScoreBreakdown {
    #[getter(total)]
    fn py_total(&self) -> f64 {
        self.total()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScoreBreakdown(priority={}, phase={}, due_date={}, overdue={}, dependency_bonus={})",
            self.priority, self.phase, self.due_date, self.overdue, self.dependency_bonus
        )
    }
}

/// Resolve the priority level, defaulting to Medium when absent.
pub fn priority_level(task: &Task, config: &RankingConfig) -> f64 {
    let priority = match task.priority.as_deref() {
        None => Priority::Medium,
        Some(label) => Priority::from_label(label).unwrap_or_else(|| {
            log_issues!(
                config.verbosity,
                "[score] task {}: unknown priority {:?}, treating as Low",
                task.id,
                label
            );
            Priority::Low
        }),
    };
    priority.level() as f64
}

/// Inverted phase ordinal: Pre-Planning=4 .. Employee Assimilation=1, unknown=1.
pub fn phase_urgency(task: &Task, config: &RankingConfig) -> f64 {
    match task.parsed_phase() {
        Some(phase) => (Phase::ALL.len() as u8 + 1 - phase.ordinal()) as f64,
        None => {
            log_issues!(
                config.verbosity,
                "[score] task {}: unknown phase {:?}, using least urgent weight",
                task.id,
                task.phase
            );
            LEAST_URGENT
        }
    }
}

/// Inverted due-date bucket ordinal: Pre-start date=7 .. Month 6=1, others=1.
pub fn due_date_urgency(task: &Task, config: &RankingConfig) -> f64 {
    match task.parsed_due_bucket().and_then(DueDateBucket::ordinal) {
        Some(ordinal) => (DueDateBucket::MAX_WEIGHTED_ORDINAL + 1 - ordinal) as f64,
        None => {
            log_issues!(
                config.verbosity,
                "[score] task {}: due-date bucket {:?} has no weight, using least urgent weight",
                task.id,
                task.suggested_due_date
            );
            LEAST_URGENT
        }
    }
}

/// Whether the task's concrete due date lies strictly before `now`.
///
/// Missing or unparseable dates are never overdue.
pub fn is_overdue(task: &Task, now: NaiveDateTime, config: &RankingConfig) -> bool {
    let Some(raw) = task.actual_due_date.as_deref() else {
        return false;
    };
    match parse_due_date(raw) {
        Some(due) => due < now,
        None => {
            log_issues!(
                config.verbosity,
                "[score] task {}: unparseable due date {:?}, treating as not overdue",
                task.id,
                raw
            );
            false
        }
    }
}

/// Compute the weighted contributions for a single task.
pub fn score_breakdown(task: &Task, now: NaiveDateTime, config: &RankingConfig) -> ScoreBreakdown {
    let overdue = if is_overdue(task, now, config) {
        config.overdue_penalty * config.overdue_weight
    } else {
        0.0
    };
    let dependency_bonus = if task.dependencies.is_empty() {
        0.0
    } else {
        config.dependency_bonus
    };

    let breakdown = ScoreBreakdown {
        priority: priority_level(task, config) * config.priority_weight,
        phase: phase_urgency(task, config) * config.phase_weight,
        due_date: due_date_urgency(task, config) * config.due_date_weight,
        overdue,
        dependency_bonus,
    };

    log_details!(
        config.verbosity,
        "[score] task {}: total={:.3} {:?}",
        task.id,
        breakdown.total(),
        breakdown
    );

    breakdown
}

/// Compute a task's criticality score.
///
/// Higher score = more urgent.
pub fn score_task(task: &Task, now: NaiveDateTime, config: &RankingConfig) -> f64 {
    score_breakdown(task, now, config).total()
}
