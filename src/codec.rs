// JSON encoding of the task collection

use crate::models::Task;
use eyre::{Context, Result, eyre};
use std::collections::HashSet;

/// Serialize the whole collection as a JSON array
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize tasks")
}

/// Parse a stored collection
///
/// Every element must be exactly `{ id, text, completed }` and ids must be
/// unique. Anything else is rejected as a whole; there is no partial load.
pub fn decode_tasks(data: &str) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(data).context("Failed to parse stored tasks")?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(eyre!("Duplicate task id in stored data: {}", task.id));
        }
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: i64) -> Vec<Task> {
        (1..=n)
            .map(|i| Task {
                id: i,
                text: format!("  task {} with \"quotes\" and ünicode ", i),
                completed: i % 2 == 0,
            })
            .collect()
    }

    #[test]
    fn test_round_trip_preserves_collection() {
        for n in [0, 1, 5] {
            let tasks = sample(n);
            let encoded = encode_tasks(&tasks).unwrap();
            assert_eq!(decode_tasks(&encoded).unwrap(), tasks);
        }
    }

    #[test]
    fn test_encode_empty_is_empty_array() {
        assert_eq!(encode_tasks(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(decode_tasks("{malformed json}").is_err());
        assert!(decode_tasks("").is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        // Not an array
        assert!(decode_tasks(r#"{"id":1,"text":"a","completed":false}"#).is_err());
        // Missing field
        assert!(decode_tasks(r#"[{"id":1,"text":"a"}]"#).is_err());
        // Wrong type
        assert!(decode_tasks(r#"[{"id":"1","text":"a","completed":false}]"#).is_err());
        assert!(decode_tasks(r#"[{"id":1,"text":"a","completed":"yes"}]"#).is_err());
        // Extra field
        assert!(decode_tasks(r#"[{"id":1,"text":"a","completed":false,"due":null}]"#).is_err());
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let data = r#"[{"id":1,"text":"a","completed":false},{"id":1,"text":"b","completed":true}]"#;
        let err = decode_tasks(data).unwrap_err();
        assert!(err.to_string().contains("Duplicate task id"));
    }

    #[test]
    fn test_decode_keeps_stored_order() {
        let data = r#"[{"id":30,"text":"c","completed":false},{"id":10,"text":"a","completed":false}]"#;
        let tasks = decode_tasks(data).unwrap();
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![30, 10]);
    }
}
