//! Host-owned checklist store.
//!
//! Holds the task collection and applies the dashboard's mutations. It keeps
//! no ranking state: callers pass `tasks()` to the engine when they need an
//! ordering.

use pyo3::prelude::*;
use thiserror::Error;

use crate::models::Task;

/// Errors from store mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("Task already exists: {0}")]
    DuplicateTask(String),
}

/// Ordered, mutable collection of checklist tasks.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ChecklistStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl ChecklistStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, next_id: 1 }
    }

    /// Snapshot of the current tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))
    }

    /// Flip a task's completion flag, returning the new value.
    pub fn toggle_completion(&mut self, id: &str) -> Result<bool, StoreError> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Append a comment line to a task.
    pub fn add_comment(&mut self, id: &str, comment: &str) -> Result<(), StoreError> {
        let task = self.get_mut(id)?;
        if task.comments.is_empty() {
            task.comments = comment.to_string();
        } else {
            task.comments.push('\n');
            task.comments.push_str(comment);
        }
        Ok(())
    }

    /// Add a new, incomplete task and return its id.
    ///
    /// An empty id is replaced by a generated `task-<n>` id.
    pub fn add_task(&mut self, mut task: Task) -> Result<String, StoreError> {
        if task.id.is_empty() {
            task.id = self.generate_id();
        } else if self.get(&task.id).is_some() {
            return Err(StoreError::DuplicateTask(task.id));
        }
        task.completed = false;
        let id = task.id.clone();
        self.tasks.push(task);
        Ok(id)
    }

    /// Remove a task, returning it.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(index))
    }

    fn generate_id(&mut self) -> String {
        loop {
            let candidate = format!("task-{}", self.next_id);
            self.next_id += 1;
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

#[pymethods]
impl ChecklistStore {
    #[new]
    #[pyo3(signature = (tasks=Vec::new()))]
    fn py_new(tasks: Vec<Task>) -> Self {
        Self::new(tasks)
    }

    #[getter(tasks)]
    fn py_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    #[pyo3(name = "get")]
    fn py_get(&self, id: &str) -> Option<Task> {
        self.get(id).cloned()
    }

    #[pyo3(name = "toggle_completion")]
    fn py_toggle_completion(&mut self, id: &str) -> PyResult<bool> {
        self.toggle_completion(id).map_err(store_error_to_py)
    }

    #[pyo3(name = "add_comment")]
    fn py_add_comment(&mut self, id: &str, comment: &str) -> PyResult<()> {
        self.add_comment(id, comment).map_err(store_error_to_py)
    }

    #[pyo3(name = "add_task")]
    fn py_add_task(&mut self, task: Task) -> PyResult<String> {
        self.add_task(task).map_err(store_error_to_py)
    }

    #[pyo3(name = "remove_task")]
    fn py_remove_task(&mut self, id: &str) -> PyResult<Task> {
        self.remove_task(id).map_err(store_error_to_py)
    }

    fn __len__(&self) -> usize {
        self.tasks.len()
    }

    fn __repr__(&self) -> String {
        format!("ChecklistStore(tasks={})", self.tasks.len())
    }
}

fn store_error_to_py(err: StoreError) -> PyErr {
    match err {
        StoreError::TaskNotFound(_) => pyo3::exceptions::PyKeyError::new_err(err.to_string()),
        StoreError::DuplicateTask(_) => pyo3::exceptions::PyValueError::new_err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> ChecklistStore {
        ChecklistStore::new(vec![
            Task::new("001", "Pre-Planning", "Pre-start date"),
            Task::new("002", "Orientation", "First day"),
        ])
    }

    #[test]
    fn test_toggle_completion() {
        let mut store = make_store();
        assert_eq!(store.toggle_completion("001"), Ok(true));
        assert_eq!(store.toggle_completion("001"), Ok(false));
        assert_eq!(
            store.toggle_completion("missing"),
            Err(StoreError::TaskNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_add_comment_joins_with_newline() {
        let mut store = make_store();
        store.add_comment("002", "first").unwrap();
        store.add_comment("002", "second").unwrap();
        assert_eq!(store.get("002").unwrap().comments, "first\nsecond");
    }

    #[test]
    fn test_add_task_generates_id_and_resets_completion() {
        let mut store = ChecklistStore::new(vec![Task::new("task-1", "Orientation", "First day")]);
        let id = store
            .add_task(Task::new("", "Orientation", "First week").with_completed(true))
            .unwrap();
        assert_eq!(id, "task-2");
        assert!(!store.get(&id).unwrap().completed);
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn test_add_task_rejects_duplicate() {
        let mut store = make_store();
        let result = store.add_task(Task::new("001", "Orientation", "First day"));
        assert_eq!(result, Err(StoreError::DuplicateTask("001".to_string())));
    }

    #[test]
    fn test_remove_task() {
        let mut store = make_store();
        let removed = store.remove_task("001").unwrap();
        assert_eq!(removed.id, "001");
        assert!(store.get("001").is_none());
        assert!(store.remove_task("001").is_err());
    }
}
