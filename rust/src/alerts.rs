//! Overdue and pending task detection at day granularity.

use chrono::NaiveDateTime;
use pyo3::prelude::*;

use crate::config::RankingConfig;
use crate::dates::{parse_due_date, start_of_day};
use crate::models::Task;
use crate::{log_details, log_issues};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Incomplete tasks needing attention, split by urgency.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlertSummary {
    /// Due before the start of today.
    #[pyo3(get)]
    pub overdue: Vec<Task>,
    /// Not overdue, due within the pending window.
    #[pyo3(get)]
    pub pending: Vec<Task>,
}

impl AlertSummary {
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.pending.is_empty()
    }
}

#[pymethods]
impl AlertSummary {
    fn __len__(&self) -> usize {
        self.overdue.len() + self.pending.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "AlertSummary(overdue={}, pending={})",
            self.overdue.len(),
            self.pending.len()
        )
    }
}

/// Whole days from `today` until `due`, rounded up.
fn days_until(due: NaiveDateTime, today: NaiveDateTime) -> i64 {
    let seconds = (due - today).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY) + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) > 0)
}

/// Classify incomplete tasks with a concrete due date as overdue or pending.
///
/// Completed tasks, tasks without a due date and tasks with an unparseable
/// due date produce no alert.
pub fn overdue_alerts(tasks: &[Task], now: NaiveDateTime, config: &RankingConfig) -> AlertSummary {
    let today = start_of_day(now);
    let mut summary = AlertSummary::default();

    for task in tasks.iter().filter(|t| !t.completed) {
        let Some(raw) = task.actual_due_date.as_deref() else {
            continue;
        };
        let Some(due) = parse_due_date(raw) else {
            log_issues!(
                config.verbosity,
                "[alerts] task {}: unparseable due date {:?}, skipped",
                task.id,
                raw
            );
            continue;
        };

        if due < today {
            log_details!(config.verbosity, "[alerts] task {}: overdue", task.id);
            summary.overdue.push(task.clone());
        } else if days_until(due, today) <= config.pending_window_days {
            log_details!(config.verbosity, "[alerts] task {}: pending", task.id);
            summary.pending.push(task.clone());
        }
    }

    summary
}
