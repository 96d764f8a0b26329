//! Task ordering for display prioritization.
//!
//! Incomplete tasks come first, ordered by criticality score (highest first).
//! Completed tasks follow in their input order. Both partitions use a stable
//! sort, so tasks with equal keys keep their relative input order.

use chrono::NaiveDateTime;
use pyo3::prelude::*;
use std::cmp::Ordering;

use crate::config::RankingConfig;
use crate::log_debug;
use crate::models::Task;
use crate::scoring::score_task;

/// Tasks sharing one phase label, ranked.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseGroup {
    #[pyo3(get)]
    pub phase: String,
    #[pyo3(get)]
    pub tasks: Vec<Task>,
}

#[pymethods]
impl PhaseGroup {
    fn __repr__(&self) -> String {
        format!("PhaseGroup(phase={:?}, tasks={})", self.phase, self.tasks.len())
    }
}

/// Sort key for a single task.
///
/// Completed tasks carry no score: their order is never decided by it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RankKey {
    Open { score: f64 },
    Done,
}

/// Compare f64 values for sorting, treating incomparable values as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl RankKey {
    fn for_task(task: &Task, now: NaiveDateTime, config: &RankingConfig) -> Self {
        if task.completed {
            Self::Done
        } else {
            Self::Open {
                score: score_task(task, now, config),
            }
        }
    }

    /// Ordering where `Less` means "shown earlier".
    fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Open { score: a }, Self::Open { score: b }) => cmp_f64(*b, *a),
            (Self::Open { .. }, Self::Done) => Ordering::Less,
            (Self::Done, Self::Open { .. }) => Ordering::Greater,
            (Self::Done, Self::Done) => Ordering::Equal,
        }
    }
}

/// Rank tasks most urgent first.
///
/// Returns a new vector holding clones of the same tasks; the input is left
/// untouched. Each score is computed once per call.
pub fn rank_tasks(tasks: &[Task], now: NaiveDateTime, config: &RankingConfig) -> Vec<Task> {
    let mut keyed: Vec<(RankKey, &Task)> = tasks
        .iter()
        .map(|task| (RankKey::for_task(task, now, config), task))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| a.rank_cmp(b));

    log_debug!(
        config.verbosity,
        "[rank] order: {:?}",
        keyed
            .iter()
            .map(|(key, task)| (task.id.as_str(), *key))
            .collect::<Vec<_>>()
    );

    keyed.into_iter().map(|(_, task)| task.clone()).collect()
}

/// Group tasks by phase label and rank each group.
///
/// Groups appear in the order their phase label is first seen in `tasks`.
pub fn group_and_rank(
    tasks: &[Task],
    now: NaiveDateTime,
    config: &RankingConfig,
) -> Vec<PhaseGroup> {
    let mut groups: Vec<(String, Vec<Task>)> = Vec::new();

    for task in tasks {
        match groups.iter_mut().find(|(phase, _)| *phase == task.phase) {
            Some((_, members)) => members.push(task.clone()),
            None => groups.push((task.phase.clone(), vec![task.clone()])),
        }
    }

    groups
        .into_iter()
        .map(|(phase, members)| PhaseGroup {
            tasks: rank_tasks(&members, now, config),
            phase,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn make_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_concrete_scenario_order() {
        let config = RankingConfig::default();
        let now = make_now();
        let yesterday = (now - Duration::days(1)).date().to_string();

        let tasks = vec![
            Task::new("B", "Pre-Planning", "Month 6").with_priority("Low"),
            Task::new("C", "Pre-Planning", "First week")
                .with_priority("Medium")
                .with_actual_due_date(yesterday),
            Task::new("A", "Pre-Planning", "First day").with_priority("Critical"),
        ];

        let ranked = rank_tasks(&tasks, now, &config);
        assert_eq!(ids(&ranked), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_completed_tasks_come_last_in_input_order() {
        let config = RankingConfig::default();
        let tasks = vec![
            Task::new("done_critical", "Pre-Planning", "Pre-start date")
                .with_priority("Critical")
                .with_completed(true),
            Task::new("open_low", "Employee Assimilation", "Month 6").with_priority("Low"),
            Task::new("done_low", "Employee Assimilation", "Month 6")
                .with_priority("Low")
                .with_completed(true),
            Task::new("open_high", "Orientation", "First day").with_priority("High"),
        ];

        let ranked = rank_tasks(&tasks, make_now(), &config);
        assert_eq!(
            ids(&ranked),
            vec!["open_high", "open_low", "done_critical", "done_low"]
        );
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let config = RankingConfig::default();
        let tasks = vec![
            Task::new("third", "Orientation", "First week"),
            Task::new("first", "Orientation", "First week"),
            Task::new("second", "Orientation", "First week"),
        ];

        let ranked = rank_tasks(&tasks, make_now(), &config);
        assert_eq!(ids(&ranked), vec!["third", "first", "second"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let config = RankingConfig::default();
        let now = make_now();
        let tasks = vec![
            Task::new("a", "General Onboarding", "Month 2"),
            Task::new("b", "Pre-Planning", "First day").with_completed(true),
            Task::new("c", "Orientation", "First week").with_dependencies(["a"]),
            Task::new("d", "Orientation", "First week"),
            Task::new("e", "Pre-Planning", "Month 3").with_actual_due_date("2024-12-01"),
        ];

        let once = rank_tasks(&tasks, now, &config);
        let twice = rank_tasks(&once, now, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank_does_not_mutate_input() {
        let config = RankingConfig::default();
        let tasks = vec![
            Task::new("low", "Employee Assimilation", "Month 6"),
            Task::new("high", "Pre-Planning", "Pre-start date").with_priority("Critical"),
        ];
        let before = tasks.clone();

        let ranked = rank_tasks(&tasks, make_now(), &config);
        assert_eq!(tasks, before);
        assert_eq!(ranked.len(), tasks.len());
        assert_eq!(ids(&ranked), vec!["high", "low"]);
    }

    #[test]
    fn test_rank_empty() {
        let ranked = rank_tasks(&[], make_now(), &RankingConfig::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_group_and_rank_keeps_first_seen_phase_order() {
        let config = RankingConfig::default();
        let tasks = vec![
            Task::new("o1", "Orientation", "Month 1"),
            Task::new("p1", "Pre-Planning", "Month 1"),
            Task::new("o2", "Orientation", "First day").with_priority("Critical"),
            Task::new("p2", "Pre-Planning", "Month 1").with_completed(true),
        ];

        let groups = group_and_rank(&tasks, make_now(), &config);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].phase, "Orientation");
        assert_eq!(ids(&groups[0].tasks), vec!["o2", "o1"]);
        assert_eq!(groups[1].phase, "Pre-Planning");
        assert_eq!(ids(&groups[1].tasks), vec!["p1", "p2"]);
    }
}
