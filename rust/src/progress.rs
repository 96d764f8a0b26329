//! Progress reducers: completion percentages, remaining effort and the
//! aggregate metrics shown on the progress dashboard.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::RankingConfig;
use crate::dates::parse_due_date;
use crate::{log_details, log_issues};
use crate::models::{Milestone, Phase, Task};

// Note: std HashMap for the PyO3-facing result types

/// Rounded percentage of `completed` over `total`; 0 when `total` is 0.
fn percentage(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Percentage (0-100) of the given tasks that are completed.
///
/// Returns 0 for an empty subset.
pub fn phase_progress(phase_tasks: &[Task]) -> i32 {
    let completed = phase_tasks.iter().filter(|t| t.completed).count();
    percentage(completed, phase_tasks.len())
}

/// Sum of estimated hours over incomplete tasks.
///
/// Tasks without an estimate count `config.default_estimated_hours`.
pub fn estimated_remaining_effort(tasks: &[Task], config: &RankingConfig) -> f64 {
    tasks
        .iter()
        .filter(|t| !t.completed)
        .map(|t| t.estimated_hours.unwrap_or(config.default_estimated_hours))
        .sum()
}

/// Percentage of the milestone's tasks that are completed.
pub fn milestone_progress(milestone: &Milestone, tasks: &[Task]) -> i32 {
    let (total, completed) = tasks
        .iter()
        .filter(|t| t.milestone_id.as_deref() == Some(milestone.id.as_str()))
        .fold((0usize, 0usize), |(total, done), t| {
            (total + 1, done + usize::from(t.completed))
        });
    percentage(completed, total)
}

/// Aggregate progress across a task collection.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressMetrics {
    #[pyo3(get)]
    pub total_tasks: usize,
    #[pyo3(get)]
    pub completed_tasks: usize,
    /// Incomplete tasks whose due date is strictly before now.
    #[pyo3(get)]
    pub overdue_tasks: usize,
    /// Incomplete tasks due within the upcoming window (overdue ones included).
    #[pyo3(get)]
    pub upcoming_tasks: usize,
    #[pyo3(get)]
    pub completion_percentage: i32,
    /// Phase label -> completion percentage, for every known phase.
    #[pyo3(get)]
    pub phase_progress: HashMap<String, i32>,
    /// Milestone id -> completed flag.
    #[pyo3(get)]
    pub milestone_progress: HashMap<String, bool>,
    #[pyo3(get)]
    pub estimated_weeks_remaining: i64,
    #[pyo3(get)]
    pub estimated_completion_date: NaiveDate,
}

#[pymethods]
impl ProgressMetrics {
    fn __repr__(&self) -> String {
        format!(
            "ProgressMetrics(completed={}/{}, overdue={}, upcoming={}, weeks_remaining={})",
            self.completed_tasks,
            self.total_tasks,
            self.overdue_tasks,
            self.upcoming_tasks,
            self.estimated_weeks_remaining
        )
    }
}

/// Weeks left at the observed completion rate.
///
/// The rate is completed tasks per elapsed week since `start`, with elapsed
/// time clamped to at least one day; with nothing completed yet the rate is
/// one task per week. The float-to-int cast saturates at `i64::MAX`.
fn estimate_weeks_remaining(
    completed: usize,
    remaining: usize,
    start: NaiveDate,
    now: NaiveDateTime,
) -> i64 {
    if remaining == 0 {
        return 0;
    }
    let tasks_per_week = if completed > 0 {
        let elapsed_days = (now.date() - start).num_days().max(1) as f64;
        completed as f64 / (elapsed_days / 7.0)
    } else {
        1.0
    };
    (remaining as f64 / tasks_per_week).ceil() as i64
}

/// `today` plus `weeks`, or `None` when that lies past the calendar.
fn completion_date(today: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    Duration::try_weeks(weeks).and_then(|d| today.checked_add_signed(d))
}

/// Compute the dashboard's aggregate metrics.
pub fn progress_metrics(
    tasks: &[Task],
    milestones: &[Milestone],
    start: NaiveDate,
    now: NaiveDateTime,
    config: &RankingConfig,
) -> ProgressMetrics {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();

    let open_due_dates: Vec<NaiveDateTime> = tasks
        .iter()
        .filter(|t| !t.completed)
        .filter_map(|t| t.actual_due_date.as_deref().and_then(parse_due_date))
        .collect();
    let overdue_tasks = open_due_dates.iter().filter(|&&due| due < now).count();
    // whole days, truncated toward zero
    let upcoming_tasks = open_due_dates
        .iter()
        .filter(|&&due| (due - now).num_days() <= config.upcoming_window_days)
        .count();

    let phase_progress: HashMap<String, i32> = Phase::ALL
        .iter()
        .map(|phase| {
            let (total, done) = tasks
                .iter()
                .filter(|t| t.phase == phase.label())
                .fold((0usize, 0usize), |(total, done), t| {
                    (total + 1, done + usize::from(t.completed))
                });
            (phase.label().to_string(), percentage(done, total))
        })
        .collect();

    let milestone_progress: HashMap<String, bool> = milestones
        .iter()
        .map(|m| (m.id.clone(), m.completed))
        .collect();

    let remaining = total_tasks - completed_tasks;
    let estimated_weeks_remaining = estimate_weeks_remaining(completed_tasks, remaining, start, now);
    let estimated_completion_date = completion_date(now.date(), estimated_weeks_remaining)
        .unwrap_or_else(|| {
            log_issues!(
                config.verbosity,
                "[progress] {} weeks remaining overflows the calendar, using {}",
                estimated_weeks_remaining,
                NaiveDate::MAX
            );
            NaiveDate::MAX
        });

    log_details!(
        config.verbosity,
        "[progress] {}/{} complete, {} overdue, {} upcoming, ~{} weeks left",
        completed_tasks,
        total_tasks,
        overdue_tasks,
        upcoming_tasks,
        estimated_weeks_remaining
    );

    ProgressMetrics {
        total_tasks,
        completed_tasks,
        overdue_tasks,
        upcoming_tasks,
        completion_percentage: percentage(completed_tasks, total_tasks),
        phase_progress,
        milestone_progress,
        estimated_weeks_remaining,
        estimated_completion_date,
    }
}
