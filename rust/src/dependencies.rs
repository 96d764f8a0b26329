//! Dependency queries over a task collection.
//!
//! Dependencies reference other tasks by id. Ids that name no task in the
//! collection ("dangling") are treated as satisfied for readiness and are
//! reported, never followed. Cycles are detected without recursion.

use pyo3::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use thiserror::Error;

use crate::config::RankingConfig;
use crate::models::Task;
use crate::{log_details, log_issues};

/// Inconsistencies found by strict dependency validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Task {task_id} depends on unknown task {missing_id}")]
    Dangling { task_id: String, missing_id: String },
    #[error("Task {0} depends on itself")]
    SelfReference(String),
    #[error("Circular dependency detected among tasks: {0:?}")]
    CircularDependency(Vec<String>),
}

/// Everything inconsistent about the dependency graph of a task collection.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyReport {
    /// (task id, missing dependency id) pairs, in input order.
    #[pyo3(get)]
    pub dangling: Vec<(String, String)>,
    /// Tasks listing their own id as a dependency.
    #[pyo3(get)]
    pub self_references: Vec<String>,
    /// Tasks lying on a dependency cycle of two or more tasks, in input order.
    #[pyo3(get)]
    pub cyclic: Vec<String>,
}

impl DependencyReport {
    pub fn is_consistent(&self) -> bool {
        self.dangling.is_empty() && self.self_references.is_empty() && self.cyclic.is_empty()
    }

    /// The first problem found, as an error.
    pub fn first_error(&self) -> Option<DependencyError> {
        if let Some((task_id, missing_id)) = self.dangling.first() {
            return Some(DependencyError::Dangling {
                task_id: task_id.clone(),
                missing_id: missing_id.clone(),
            });
        }
        if let Some(task_id) = self.self_references.first() {
            return Some(DependencyError::SelfReference(task_id.clone()));
        }
        if !self.cyclic.is_empty() {
            return Some(DependencyError::CircularDependency(self.cyclic.clone()));
        }
        None
    }
}

#[pymethods]
impl DependencyReport {
    #[getter(is_consistent)]
    fn py_is_consistent(&self) -> bool {
        self.is_consistent()
    }

    fn __repr__(&self) -> String {
        format!(
            "DependencyReport(dangling={}, self_references={}, cyclic={})",
            self.dangling.len(),
            self.self_references.len(),
            self.cyclic.len()
        )
    }
}

/// Ids referenced as a dependency by at least one task.
///
/// Deduplicated, in order of first reference.
pub fn blocking_task_ids(tasks: &[Task]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut result = Vec::new();
    for task in tasks {
        for dep in &task.dependencies {
            if seen.insert(dep.as_str()) {
                result.push(dep.clone());
            }
        }
    }
    result
}

/// Completion state per id. An id shared by several tasks counts as
/// completed only when all of them are.
fn completion_by_id(tasks: &[Task]) -> FxHashMap<&str, bool> {
    let mut completed: FxHashMap<&str, bool> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for task in tasks {
        completed
            .entry(task.id.as_str())
            .and_modify(|c| *c &= task.completed)
            .or_insert(task.completed);
    }
    completed
}

/// Incomplete tasks whose dependencies are all completed.
///
/// A task without dependencies is always ready. Dangling dependency ids are
/// treated as satisfied.
pub fn ready_tasks(tasks: &[Task], config: &RankingConfig) -> Vec<Task> {
    let completed = completion_by_id(tasks);

    tasks
        .iter()
        .filter(|task| {
            if task.completed {
                return false;
            }
            let ready = task.dependencies.iter().all(|dep| match completed.get(dep.as_str()) {
                Some(&done) => done,
                None => {
                    log_issues!(
                        config.verbosity,
                        "[deps] task {}: dependency {} not found, treating as satisfied",
                        task.id,
                        dep
                    );
                    true
                }
            });
            if !ready {
                log_details!(
                    config.verbosity,
                    "[deps] task {}: waiting on incomplete dependencies",
                    task.id
                );
            }
            ready
        })
        .cloned()
        .collect()
}

/// Ids that survive Kahn's algorithm: tasks on a cycle or upstream of one.
///
/// Edges run from a task to each of its (known, non-self) dependencies.
fn kahn_leftovers<'a>(graph: &FxHashMap<&'a str, Vec<&'a str>>) -> FxHashSet<&'a str> {
    // in-degree = number of dependents pointing at each task
    let mut in_degree: FxHashMap<&str, usize> = graph.keys().map(|&id| (id, 0)).collect();
    for deps in graph.values() {
        for dep in deps {
            if let Some(degree) = in_degree.get_mut(dep) {
                *degree += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut removed: FxHashSet<&str> = FxHashSet::default();

    while let Some(task_id) = queue.pop_front() {
        removed.insert(task_id);
        if let Some(deps) = graph.get(task_id) {
            for &dep in deps {
                if let Some(degree) = in_degree.get_mut(dep) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dep);
                    }
                }
            }
        }
    }

    graph
        .keys()
        .copied()
        .filter(|id| !removed.contains(id))
        .collect()
}

/// Whether `start` can reach itself following edges inside `within`.
fn on_cycle(start: &str, graph: &FxHashMap<&str, Vec<&str>>, within: &FxHashSet<&str>) -> bool {
    let mut stack: Vec<&str> = vec![start];
    let mut visited: FxHashSet<&str> = FxHashSet::default();

    while let Some(node) = stack.pop() {
        let Some(deps) = graph.get(node) else {
            continue;
        };
        for &dep in deps {
            if dep == start {
                return true;
            }
            if within.contains(dep) && visited.insert(dep) {
                stack.push(dep);
            }
        }
    }
    false
}

/// Inspect the dependency graph for dangling ids, self references and cycles.
pub fn dependency_report(tasks: &[Task], config: &RankingConfig) -> DependencyReport {
    let known: FxHashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut report = DependencyReport::default();
    let mut graph: FxHashMap<&str, Vec<&str>> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());

    for task in tasks {
        let edges = graph.entry(task.id.as_str()).or_default();
        for dep in &task.dependencies {
            if *dep == task.id {
                if !report.self_references.contains(&task.id) {
                    report.self_references.push(task.id.clone());
                }
            } else if known.contains(dep.as_str()) {
                edges.push(dep.as_str());
            } else {
                report.dangling.push((task.id.clone(), dep.clone()));
            }
        }
    }

    let leftovers = kahn_leftovers(&graph);
    if !leftovers.is_empty() {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for task in tasks {
            let id = task.id.as_str();
            if leftovers.contains(id) && seen.insert(id) && on_cycle(id, &graph, &leftovers) {
                report.cyclic.push(task.id.clone());
            }
        }
    }

    if !report.is_consistent() {
        log_issues!(
            config.verbosity,
            "[deps] inconsistent dependencies: {} dangling, {} self references, {} on cycles",
            report.dangling.len(),
            report.self_references.len(),
            report.cyclic.len()
        );
    }

    report
}

/// Strict form of [`dependency_report`]: fails on the first inconsistency.
pub fn validate_dependencies(tasks: &[Task], config: &RankingConfig) -> Result<(), DependencyError> {
    match dependency_report(tasks, config).first_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, "Orientation", "First week").with_dependencies(deps.iter().copied())
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_blocking_ids_deduplicated_in_first_reference_order() {
        let tasks = vec![
            make_task("c", &["b", "a"]),
            make_task("d", &["a"]),
            make_task("a", &[]),
            make_task("b", &[]),
        ];
        assert_eq!(blocking_task_ids(&tasks), vec!["b", "a"]);
    }

    #[test]
    fn test_blocking_ids_include_dangling() {
        let tasks = vec![make_task("a", &["ghost"])];
        assert_eq!(blocking_task_ids(&tasks), vec!["ghost"]);
    }

    #[test]
    fn test_ready_tasks() {
        let config = RankingConfig::default();
        let tasks = vec![
            make_task("free", &[]),
            make_task("blocked", &["pending"]),
            make_task("pending", &[]),
            make_task("done", &[]).with_completed(true),
            make_task("unblocked", &["done"]),
            make_task("finished_free", &[]).with_completed(true),
        ];

        let ready = ready_tasks(&tasks, &config);
        assert_eq!(ids(&ready), vec!["free", "pending", "unblocked"]);

        let verbose = RankingConfig {
            verbosity: crate::logging::VERBOSITY_DETAILS,
            ..RankingConfig::default()
        };
        assert_eq!(ids(&ready_tasks(&tasks, &verbose)), ids(&ready));
    }

    #[test]
    fn test_dangling_dependency_counts_as_satisfied() {
        let config = RankingConfig::default();
        let tasks = vec![make_task("a", &["ghost"])];
        assert_eq!(ids(&ready_tasks(&tasks, &config)), vec!["a"]);
    }

    #[test]
    fn test_ready_tasks_with_cycle_terminates() {
        let config = RankingConfig::default();
        let tasks = vec![make_task("a", &["b"]), make_task("b", &["a"])];
        assert!(ready_tasks(&tasks, &config).is_empty());
    }

    #[test]
    fn test_report_clean_graph() {
        let config = RankingConfig::default();
        let tasks = vec![
            make_task("a", &[]),
            make_task("b", &["a"]),
            make_task("c", &["a", "b"]),
        ];
        let report = dependency_report(&tasks, &config);
        assert!(report.is_consistent());
        assert!(validate_dependencies(&tasks, &config).is_ok());
    }

    #[test]
    fn test_report_finds_cycle_members_only() {
        let config = RankingConfig::default();
        // upstream -> (x -> y -> z -> x), and "leaf" depends on the cycle
        let tasks = vec![
            make_task("leaf", &["x"]),
            make_task("x", &["y"]),
            make_task("y", &["z"]),
            make_task("z", &["x", "upstream"]),
            make_task("upstream", &[]),
        ];
        let report = dependency_report(&tasks, &config);
        assert_eq!(report.cyclic, vec!["x", "y", "z"]);
        assert!(report.dangling.is_empty());
        assert!(matches!(
            validate_dependencies(&tasks, &config),
            Err(DependencyError::CircularDependency(_))
        ));
    }

    #[test]
    fn test_report_dangling_and_self_reference() {
        let config = RankingConfig::default();
        let tasks = vec![make_task("a", &["a", "ghost"]), make_task("b", &[])];
        let report = dependency_report(&tasks, &config);
        assert_eq!(
            report.dangling,
            vec![("a".to_string(), "ghost".to_string())]
        );
        assert_eq!(report.self_references, vec!["a"]);
        assert!(report.cyclic.is_empty());
        assert_eq!(
            validate_dependencies(&tasks, &config),
            Err(DependencyError::Dangling {
                task_id: "a".to_string(),
                missing_id: "ghost".to_string()
            })
        );
    }
}
