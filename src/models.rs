// Data models for the task list

use serde::{Deserialize, Serialize};

/// One to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// The task currently being edited and its uncommitted draft
///
/// Lives only in memory; the draft is not written into the task until the
/// edit is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: i64,
    pub draft: String,
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
