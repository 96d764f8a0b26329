//! Rust implementation of the onboarding checklist ranking engine.
//!
//! This module provides the task criticality score, the display ordering built
//! on it, and the read-only reducers the checklist dashboard derives from the
//! same task collection. Every operation is a pure function of its inputs and
//! an explicit `now`.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{NaiveDate, NaiveDateTime};
use pyo3::prelude::*;
use std::collections::HashMap;

pub mod alerts;
mod config;
pub mod dates;
pub mod dependencies;
pub mod filter;
pub mod logging;
mod models;
pub mod progress;
pub mod ranking;
pub mod scoring;
pub mod store;

pub use alerts::{overdue_alerts, AlertSummary};
pub use config::{ConfigError, RankingConfig};
pub use dependencies::{
    blocking_task_ids, dependency_report, ready_tasks, validate_dependencies, DependencyError,
    DependencyReport,
};
pub use filter::{filter_tasks, TaskFilter};
pub use models::{DueDateBucket, Milestone, Phase, Priority, Task};
pub use progress::{
    estimated_remaining_effort, milestone_progress, phase_progress, progress_metrics,
    ProgressMetrics,
};
pub use ranking::{group_and_rank, rank_tasks, PhaseGroup};
pub use scoring::{score_breakdown, score_task, ScoreBreakdown};
pub use store::{ChecklistStore, StoreError};

/// Resolve an optional config from Python, rejecting unusable weights.
fn resolve_config(config: Option<RankingConfig>) -> PyResult<RankingConfig> {
    let config = config.unwrap_or_default();
    config
        .validate()
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    Ok(config)
}

/// Compute a task's criticality score.
///
/// # Arguments
/// * `task` - Task to score
/// * `now` - Current time, used for overdue detection
/// * `config` - Ranking weights (defaults if omitted)
///
/// # Returns
/// * Score (higher = more urgent); only meaningful relative to other scores
///
/// # Raises
/// * ValueError if the config has non-finite or negative weights
#[pyfunction]
#[pyo3(name = "score_task", signature = (task, now, config=None))]
fn py_score_task(task: Task, now: NaiveDateTime, config: Option<RankingConfig>) -> PyResult<f64> {
    let config = resolve_config(config)?;
    Ok(score_task(&task, now, &config))
}

/// Compute the weighted per-axis contributions behind a task's score.
#[pyfunction]
#[pyo3(name = "score_breakdown", signature = (task, now, config=None))]
fn py_score_breakdown(
    task: Task,
    now: NaiveDateTime,
    config: Option<RankingConfig>,
) -> PyResult<ScoreBreakdown> {
    let config = resolve_config(config)?;
    Ok(score_breakdown(&task, now, &config))
}

/// Rank tasks most urgent first.
///
/// Incomplete tasks come first by descending score; completed tasks follow.
/// Ties keep their input order.
///
/// # Arguments
/// * `tasks` - Task collection (not modified)
/// * `now` - Current time, used for overdue detection
/// * `config` - Ranking weights (defaults if omitted)
///
/// # Returns
/// * New list holding the same tasks in ranked order
///
/// # Raises
/// * ValueError if the config has non-finite or negative weights
#[pyfunction]
#[pyo3(name = "rank_tasks", signature = (tasks, now, config=None))]
fn py_rank_tasks(
    tasks: Vec<Task>,
    now: NaiveDateTime,
    config: Option<RankingConfig>,
) -> PyResult<Vec<Task>> {
    let config = resolve_config(config)?;
    Ok(rank_tasks(&tasks, now, &config))
}

/// Group tasks by phase (first-seen order) and rank each group.
#[pyfunction]
#[pyo3(name = "group_and_rank", signature = (tasks, now, config=None))]
fn py_group_and_rank(
    tasks: Vec<Task>,
    now: NaiveDateTime,
    config: Option<RankingConfig>,
) -> PyResult<Vec<PhaseGroup>> {
    let config = resolve_config(config)?;
    Ok(group_and_rank(&tasks, now, &config))
}

/// Ids referenced as a dependency by any task, in first-reference order.
#[pyfunction]
#[pyo3(name = "blocking_task_ids")]
fn py_blocking_task_ids(tasks: Vec<Task>) -> Vec<String> {
    blocking_task_ids(&tasks)
}

/// Incomplete tasks whose dependencies are all completed.
///
/// Dependencies naming no task in the collection count as satisfied.
#[pyfunction]
#[pyo3(name = "ready_tasks", signature = (tasks, config=None))]
fn py_ready_tasks(tasks: Vec<Task>, config: Option<RankingConfig>) -> PyResult<Vec<Task>> {
    let config = resolve_config(config)?;
    Ok(ready_tasks(&tasks, &config))
}

/// Dangling ids, self references and cycles in the dependency graph.
#[pyfunction]
#[pyo3(name = "dependency_report", signature = (tasks, config=None))]
fn py_dependency_report(
    tasks: Vec<Task>,
    config: Option<RankingConfig>,
) -> PyResult<DependencyReport> {
    let config = resolve_config(config)?;
    Ok(dependency_report(&tasks, &config))
}

/// Raise ValueError on the first dependency inconsistency.
#[pyfunction]
#[pyo3(name = "validate_dependencies", signature = (tasks, config=None))]
fn py_validate_dependencies(tasks: Vec<Task>, config: Option<RankingConfig>) -> PyResult<()> {
    let config = resolve_config(config)?;
    validate_dependencies(&tasks, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Percentage (0-100) of the given tasks that are completed; 0 when empty.
#[pyfunction]
#[pyo3(name = "phase_progress")]
fn py_phase_progress(tasks: Vec<Task>) -> i32 {
    phase_progress(&tasks)
}

/// Sum of estimated hours over incomplete tasks.
#[pyfunction]
#[pyo3(name = "estimated_remaining_effort", signature = (tasks, config=None))]
fn py_estimated_remaining_effort(tasks: Vec<Task>, config: Option<RankingConfig>) -> PyResult<f64> {
    let config = resolve_config(config)?;
    Ok(estimated_remaining_effort(&tasks, &config))
}

/// Completion percentage of each milestone's tasks, keyed by milestone id.
#[pyfunction]
#[pyo3(name = "milestone_progress")]
fn py_milestone_progress(milestones: Vec<Milestone>, tasks: Vec<Task>) -> HashMap<String, i32> {
    milestones
        .iter()
        .map(|m| (m.id.clone(), milestone_progress(m, &tasks)))
        .collect()
}

/// Aggregate dashboard metrics.
///
/// # Arguments
/// * `tasks` - Task collection
/// * `milestones` - Milestones (completion flags are reported as-is)
/// * `start` - Onboarding start date, for the completion-rate estimate
/// * `now` - Current time
/// * `config` - Windows and defaults (defaults if omitted)
#[pyfunction]
#[pyo3(name = "progress_metrics", signature = (tasks, milestones, start, now, config=None))]
fn py_progress_metrics(
    tasks: Vec<Task>,
    milestones: Vec<Milestone>,
    start: NaiveDate,
    now: NaiveDateTime,
    config: Option<RankingConfig>,
) -> PyResult<ProgressMetrics> {
    let config = resolve_config(config)?;
    Ok(progress_metrics(&tasks, &milestones, start, now, &config))
}

/// Split incomplete tasks into overdue and pending alerts.
#[pyfunction]
#[pyo3(name = "overdue_alerts", signature = (tasks, now, config=None))]
fn py_overdue_alerts(
    tasks: Vec<Task>,
    now: NaiveDateTime,
    config: Option<RankingConfig>,
) -> PyResult<AlertSummary> {
    let config = resolve_config(config)?;
    Ok(overdue_alerts(&tasks, now, &config))
}

/// Tasks matching a phase / owner / text filter, in input order.
#[pyfunction]
#[pyo3(name = "filter_tasks")]
fn py_filter_tasks(tasks: Vec<Task>, filter: TaskFilter) -> Vec<Task> {
    filter_tasks(&tasks, &filter)
}

/// The checklist_rank.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<Milestone>()?;
    m.add_class::<ChecklistStore>()?;
    m.add_class::<TaskFilter>()?;

    // Result types
    m.add_class::<ScoreBreakdown>()?;
    m.add_class::<PhaseGroup>()?;
    m.add_class::<DependencyReport>()?;
    m.add_class::<ProgressMetrics>()?;
    m.add_class::<AlertSummary>()?;

    // Config types
    m.add_class::<RankingConfig>()?;

    // Ranking engine
    m.add_function(wrap_pyfunction!(py_score_task, m)?)?;
    m.add_function(wrap_pyfunction!(py_score_breakdown, m)?)?;
    m.add_function(wrap_pyfunction!(py_rank_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(py_group_and_rank, m)?)?;

    // Dependency queries
    m.add_function(wrap_pyfunction!(py_blocking_task_ids, m)?)?;
    m.add_function(wrap_pyfunction!(py_ready_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(py_dependency_report, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_dependencies, m)?)?;

    // Reducers
    m.add_function(wrap_pyfunction!(py_phase_progress, m)?)?;
    m.add_function(wrap_pyfunction!(py_estimated_remaining_effort, m)?)?;
    m.add_function(wrap_pyfunction!(py_milestone_progress, m)?)?;
    m.add_function(wrap_pyfunction!(py_progress_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(py_overdue_alerts, m)?)?;
    m.add_function(wrap_pyfunction!(py_filter_tasks, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_defaults_and_rejects_bad_weights() {
        let config = resolve_config(None).unwrap();
        assert_eq!(config, RankingConfig::default());

        let bad = RankingConfig {
            priority_weight: f64::INFINITY,
            ..RankingConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
