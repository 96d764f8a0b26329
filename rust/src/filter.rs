//! Checklist filtering by phase, owner and free-text search.

use pyo3::prelude::*;

use crate::models::Task;

/// Filter criteria. Empty lists and an empty query match everything.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    #[pyo3(get, set)]
    pub phases: Vec<String>,
    #[pyo3(get, set)]
    pub owners: Vec<String>,
    /// Case-insensitive substring matched against title and description.
    #[pyo3(get, set)]
    pub query: String,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let phase_ok = self.phases.is_empty() || self.phases.contains(&task.phase);
        let owner_ok = self.owners.is_empty() || self.owners.contains(&task.owner);
        phase_ok && owner_ok && self.matches_query(task)
    }

    fn matches_query(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }
}

#[pymethods]
impl TaskFilter {
    #[new]
    #[pyo3(signature = (phases=Vec::new(), owners=Vec::new(), query=String::new()))]
    fn new(phases: Vec<String>, owners: Vec<String>, query: String) -> Self {
        Self {
            phases,
            owners,
            query,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskFilter(phases={:?}, owners={:?}, query={:?})",
            self.phases, self.owners, self.query
        )
    }
}

/// Tasks matching `filter`, in input order.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}
