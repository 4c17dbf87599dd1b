// Views over the task collection

use crate::models::Task;
use eyre::{Result, eyre};
use std::str::FromStr;

/// Which tasks a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "active" => Ok(TaskFilter::Active),
            "completed" | "done" => Ok(TaskFilter::Completed),
            other => Err(eyre!("Unknown filter: {} (expected all, active or completed)", other)),
        }
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskFilter::All => write!(f, "all"),
            TaskFilter::Active => write!(f, "active"),
            TaskFilter::Completed => write!(f, "completed"),
        }
    }
}

/// Tally of the collection by completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}
