//! Core data types for the onboarding checklist.

use pyo3::prelude::*;

// Note: labels stay as strings on the record for PyO3 interface compatibility;
// the typed enums below are parsed on demand.

/// Onboarding phase, ordered by time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    PrePlanning,
    Orientation,
    GeneralOnboarding,
    EmployeeAssimilation,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::PrePlanning,
        Phase::Orientation,
        Phase::GeneralOnboarding,
        Phase::EmployeeAssimilation,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pre-Planning" => Some(Self::PrePlanning),
            "Orientation" => Some(Self::Orientation),
            "General Onboarding" => Some(Self::GeneralOnboarding),
            "Employee Assimilation" => Some(Self::EmployeeAssimilation),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PrePlanning => "Pre-Planning",
            Self::Orientation => "Orientation",
            Self::GeneralOnboarding => "General Onboarding",
            Self::EmployeeAssimilation => "Employee Assimilation",
        }
    }

    /// Position in the phase sequence, 1-based.
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }
}

/// Task priority level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Low=1, Medium=2, High=3, Critical=4.
    pub fn level(self) -> u8 {
        self as u8 + 1
    }
}

/// Coarse suggested deadline for a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DueDateBucket {
    PreStart,
    FirstDay,
    FirstWeek,
    Month1,
    Month2,
    Month3,
    Month6,
    Month9,
    Month12,
}

impl DueDateBucket {
    /// Highest ordinal that carries an urgency weight.
    pub const MAX_WEIGHTED_ORDINAL: u8 = 7;

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pre-start date" => Some(Self::PreStart),
            "First day" => Some(Self::FirstDay),
            "First week" => Some(Self::FirstWeek),
            "Month 1" => Some(Self::Month1),
            "Month 2" => Some(Self::Month2),
            "Month 3" => Some(Self::Month3),
            "Month 6" => Some(Self::Month6),
            "Month 9" => Some(Self::Month9),
            "Month 12" => Some(Self::Month12),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PreStart => "Pre-start date",
            Self::FirstDay => "First day",
            Self::FirstWeek => "First week",
            Self::Month1 => "Month 1",
            Self::Month2 => "Month 2",
            Self::Month3 => "Month 3",
            Self::Month6 => "Month 6",
            Self::Month9 => "Month 9",
            Self::Month12 => "Month 12",
        }
    }

    /// Position in the weighted bucket sequence, 1-based.
    ///
    /// Month 9 and Month 12 are valid labels but sit outside the weighted
    /// sequence and return `None`.
    pub fn ordinal(self) -> Option<u8> {
        match self {
            Self::Month9 | Self::Month12 => None,
            other => Some(other as u8 + 1),
        }
    }
}

/// An onboarding task.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub phase: String,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub description: String,
    #[pyo3(get, set)]
    pub owner: String,
    #[pyo3(get, set)]
    pub suggested_due_date: String,
    #[pyo3(get, set)]
    pub comments: String,
    #[pyo3(get, set)]
    pub completed: bool,
    #[pyo3(get, set)]
    pub actual_due_date: Option<String>,
    #[pyo3(get, set)]
    pub priority: Option<String>,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
    #[pyo3(get, set)]
    pub estimated_hours: Option<f64>,
    #[pyo3(get, set)]
    pub milestone_id: Option<String>,
}

impl Task {
    /// A minimal incomplete task with empty descriptive fields.
    pub fn new(
        id: impl Into<String>,
        phase: impl Into<String>,
        suggested_due_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            phase: phase.into(),
            title: String::new(),
            description: String::new(),
            owner: String::new(),
            suggested_due_date: suggested_due_date.into(),
            comments: String::new(),
            completed: false,
            actual_due_date: None,
            priority: None,
            dependencies: Vec::new(),
            estimated_hours: None,
            milestone_id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_actual_due_date(mut self, due: impl Into<String>) -> Self {
        self.actual_due_date = Some(due.into());
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_milestone(mut self, milestone_id: impl Into<String>) -> Self {
        self.milestone_id = Some(milestone_id.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn parsed_phase(&self) -> Option<Phase> {
        Phase::from_label(&self.phase)
    }

    pub fn parsed_due_bucket(&self) -> Option<DueDateBucket> {
        DueDateBucket::from_label(&self.suggested_due_date)
    }
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        phase,
        suggested_due_date,
        title=String::new(),
        description=String::new(),
        owner=String::new(),
        comments=String::new(),
        completed=false,
        actual_due_date=None,
        priority=None,
        dependencies=Vec::new(),
        estimated_hours=None,
        milestone_id=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        id: String,
        phase: String,
        suggested_due_date: String,
        title: String,
        description: String,
        owner: String,
        comments: String,
        completed: bool,
        actual_due_date: Option<String>,
        priority: Option<String>,
        dependencies: Vec<String>,
        estimated_hours: Option<f64>,
        milestone_id: Option<String>,
    ) -> Self {
        Self {
            id,
            phase,
            title,
            description,
            owner,
            suggested_due_date,
            comments,
            completed,
            actual_due_date,
            priority,
            dependencies,
            estimated_hours,
            milestone_id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, phase={:?}, priority={:?}, completed={}, deps={})",
            self.id,
            self.phase,
            self.priority,
            self.completed,
            self.dependencies.len()
        )
    }
}

/// A checkpoint grouping several tasks.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Milestone {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub phase: String,
    #[pyo3(get, set)]
    pub target_date: Option<String>,
    #[pyo3(get, set)]
    pub completed: bool,
}

#[pymethods]
impl Milestone {
    #[new]
    #[pyo3(signature = (id, title, phase, target_date=None, completed=false))]
    pub fn new(
        id: String,
        title: String,
        phase: String,
        target_date: Option<String>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            title,
            phase,
            target_date,
            completed,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Milestone(id={:?}, title={:?}, completed={})",
            self.id, self.title, self.completed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels_round_trip_and_ordinals() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(Phase::from_label(phase.label()), Some(*phase));
            assert_eq!(phase.ordinal() as usize, i + 1);
        }
        assert_eq!(Phase::from_label("pre-planning"), None);
    }

    #[test]
    fn test_priority_levels() {
        assert_eq!(Priority::Low.level(), 1);
        assert_eq!(Priority::Medium.level(), 2);
        assert_eq!(Priority::High.level(), 3);
        assert_eq!(Priority::Critical.level(), 4);
        assert_eq!(Priority::from_label("Urgent"), None);
    }

    #[test]
    fn test_due_bucket_ordinals() {
        assert_eq!(DueDateBucket::PreStart.ordinal(), Some(1));
        assert_eq!(DueDateBucket::FirstWeek.ordinal(), Some(3));
        assert_eq!(
            DueDateBucket::Month6.ordinal(),
            Some(DueDateBucket::MAX_WEIGHTED_ORDINAL)
        );
        assert_eq!(DueDateBucket::Month9.ordinal(), None);
        assert_eq!(DueDateBucket::Month12.ordinal(), None);
        assert_eq!(
            DueDateBucket::from_label("Month 12"),
            Some(DueDateBucket::Month12)
        );
    }

    #[test]
    fn test_task_builder() {
        let task = Task::new("001", "Orientation", "First day")
            .with_priority("High")
            .with_dependencies(["000"])
            .with_estimated_hours(1.5);
        assert_eq!(task.parsed_phase(), Some(Phase::Orientation));
        assert_eq!(task.parsed_due_bucket(), Some(DueDateBucket::FirstDay));
        assert_eq!(task.dependencies, vec!["000".to_string()]);
        assert!(!task.completed);
    }
}
