//! Configuration types for the ranking engine.

use pyo3::prelude::*;
use thiserror::Error;

/// Errors raised when a configuration cannot be used for scoring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("{name} must be non-negative (got {value})")]
    NegativeWindow { name: &'static str, value: i64 },
}

/// Weights and thresholds used by scoring, progress and alert reducers.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct RankingConfig {
    /// Weight applied to the priority level (Critical=4 .. Low=1)
    #[pyo3(get, set)]
    pub priority_weight: f64,
    /// Weight applied to the inverted phase ordinal
    #[pyo3(get, set)]
    pub phase_weight: f64,
    /// Weight applied to the inverted due-date bucket ordinal
    #[pyo3(get, set)]
    pub due_date_weight: f64,
    /// Weight applied to the overdue penalty
    #[pyo3(get, set)]
    pub overdue_weight: f64,
    /// Penalty points added (before weighting) when a task is past its due date
    #[pyo3(get, set)]
    pub overdue_penalty: f64,
    /// Unweighted bonus for tasks that record dependencies
    #[pyo3(get, set)]
    pub dependency_bonus: f64,
    /// Effort assumed for tasks without an estimate, in hours
    #[pyo3(get, set)]
    pub default_estimated_hours: f64,
    /// Days ahead counted as "upcoming" in progress metrics
    #[pyo3(get, set)]
    pub upcoming_window_days: i64,
    /// Days ahead counted as "pending" in alerts
    #[pyo3(get, set)]
    pub pending_window_days: i64,
    /// Verbosity level: 0=silent, 1=issues, 2=details, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            priority_weight: 0.4,
            phase_weight: 0.2,
            due_date_weight: 0.25,
            overdue_weight: 0.15,
            overdue_penalty: 3.0,
            dependency_bonus: 0.5,
            default_estimated_hours: 2.0,
            upcoming_window_days: 7,
            pending_window_days: 3,
            verbosity: 0,
        }
    }
}

impl RankingConfig {
    /// Check that every weight is finite and non-negative and that the day
    /// windows are non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("priority_weight", self.priority_weight),
            ("phase_weight", self.phase_weight),
            ("due_date_weight", self.due_date_weight),
            ("overdue_weight", self.overdue_weight),
            ("overdue_penalty", self.overdue_penalty),
            ("dependency_bonus", self.dependency_bonus),
            ("default_estimated_hours", self.default_estimated_hours),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        let windows = [
            ("upcoming_window_days", self.upcoming_window_days),
            ("pending_window_days", self.pending_window_days),
        ];
        for (name, value) in windows {
            if value < 0 {
                return Err(ConfigError::NegativeWindow { name, value });
            }
        }

        Ok(())
    }
}

#[pymethods]
impl RankingConfig {
    #[new]
    #[pyo3(signature = (
        priority_weight=None,
        phase_weight=None,
        due_date_weight=None,
        overdue_weight=None,
        overdue_penalty=None,
        dependency_bonus=None,
        default_estimated_hours=None,
        upcoming_window_days=None,
        pending_window_days=None,
        verbosity=0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        priority_weight: Option<f64>,
        phase_weight: Option<f64>,
        due_date_weight: Option<f64>,
        overdue_weight: Option<f64>,
        overdue_penalty: Option<f64>,
        dependency_bonus: Option<f64>,
        default_estimated_hours: Option<f64>,
        upcoming_window_days: Option<i64>,
        pending_window_days: Option<i64>,
        verbosity: u8,
    ) -> Self {
        let defaults = Self::default();
        Self {
            priority_weight: priority_weight.unwrap_or(defaults.priority_weight),
            phase_weight: phase_weight.unwrap_or(defaults.phase_weight),
            due_date_weight: due_date_weight.unwrap_or(defaults.due_date_weight),
            overdue_weight: overdue_weight.unwrap_or(defaults.overdue_weight),
            overdue_penalty: overdue_penalty.unwrap_or(defaults.overdue_penalty),
            dependency_bonus: dependency_bonus.unwrap_or(defaults.dependency_bonus),
            default_estimated_hours: default_estimated_hours
                .unwrap_or(defaults.default_estimated_hours),
            upcoming_window_days: upcoming_window_days.unwrap_or(defaults.upcoming_window_days),
            pending_window_days: pending_window_days.unwrap_or(defaults.pending_window_days),
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RankingConfig(priority_weight={}, phase_weight={}, due_date_weight={}, overdue_weight={})",
            self.priority_weight, self.phase_weight, self.due_date_weight, self.overdue_weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RankingConfig::default();
        assert!((config.priority_weight - 0.4).abs() < 1e-9);
        assert!((config.phase_weight - 0.2).abs() < 1e-9);
        assert!((config.due_date_weight - 0.25).abs() < 1e-9);
        assert!((config.overdue_weight - 0.15).abs() < 1e-9);
        assert!((config.overdue_penalty - 3.0).abs() < 1e-9);
        assert!((config.dependency_bonus - 0.5).abs() < 1e-9);
        assert_eq!(config.verbosity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_weight() {
        let config = RankingConfig {
            phase_weight: f64::NAN,
            ..RankingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                name: "phase_weight",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_window() {
        let config = RankingConfig {
            pending_window_days: -1,
            ..RankingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeWindow {
                name: "pending_window_days",
                value: -1
            })
        );
    }
}
