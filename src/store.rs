// Task list store mirrored to a key-value slot

use crate::codec::{decode_tasks, encode_tasks};
use crate::filter::{TaskCounts, TaskFilter};
use crate::ids::IdGenerator;
use crate::models::{EditSession, Task};
use crate::storage::Storage;
use eyre::Result;
use tracing::{debug, info, warn};

/// Storage key used when none is given
pub const DEFAULT_KEY: &str = "react-todo-tasks";

/// Ordered task collection with a single optional edit session
///
/// Every mutation writes the full collection back to the storage slot. Load
/// and write failures are logged and swallowed; the in-memory list stays the
/// source of truth.
pub struct TaskList<S: Storage, G: IdGenerator> {
    storage: S,
    ids: G,
    key: String,
    tasks: Vec<Task>,
    editing: Option<EditSession>,
    load_failed: bool,
}

impl<S: Storage, G: IdGenerator> TaskList<S, G> {
    /// Load the list from the default slot
    pub fn open(storage: S, ids: G) -> Self {
        Self::open_with_key(storage, ids, DEFAULT_KEY)
    }

    /// Load the list from the given slot
    ///
    /// Missing data starts an empty list. Unreadable or malformed data is
    /// logged and also starts an empty list; the next mutation then
    /// overwrites the slot.
    pub fn open_with_key(storage: S, mut ids: G, key: impl Into<String>) -> Self {
        let key = key.into();

        let (tasks, load_failed) = match Self::load(&storage, &key) {
            Ok(tasks) => (tasks, false),
            Err(e) => {
                warn!(
                    key = %key,
                    error = ?e,
                    "Failed to load tasks from storage, starting empty; slot will be overwritten on the next change"
                );
                (Vec::new(), true)
            }
        };

        for task in &tasks {
            ids.observe(task.id);
        }

        info!(key = %key, count = tasks.len(), "Loaded tasks");

        Self {
            storage,
            ids,
            key,
            tasks,
            editing: None,
            load_failed,
        }
    }

    /// Read and decode a slot without any fallback
    pub fn load(storage: &S, key: &str) -> Result<Vec<Task>> {
        match storage.get(key)? {
            Some(data) => decode_tasks(&data),
            None => Ok(Vec::new()),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The active edit session, if any. Always refers to a task in the list.
    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// The task currently being edited
    pub fn editing_task(&self) -> Option<&Task> {
        self.editing.as_ref().and_then(|s| self.get(s.task_id))
    }

    pub fn filtered(&self, filter: TaskFilter) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    /// True when the slot held data that could not be loaded
    ///
    /// The first persisted mutation replaces that data.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a task with the trimmed text
    ///
    /// Returns the new id, or `None` when the text is blank or no id is left.
    pub fn add_task(&mut self, raw_text: &str) -> Option<i64> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("add_task: blank text ignored");
            return None;
        }

        let Some(id) = self.fresh_id() else {
            warn!(key = %self.key, "Task id space exhausted, task not added");
            return None;
        };
        self.tasks.push(Task::new(id, text));
        debug!(id, "add_task: appended");

        self.persist();
        Some(id)
    }

    /// Flip the completed flag. Returns false if no task has this id.
    pub fn toggle_complete(&mut self, id: i64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "toggle_complete: no such task");
            return false;
        };

        task.completed = !task.completed;
        debug!(id, completed = task.completed, "toggle_complete: flipped");

        self.persist();
        true
    }

    /// Start editing a task, replacing any other edit session
    ///
    /// Ignored if no task has this id.
    pub fn begin_edit(&mut self, id: i64, current_text: impl Into<String>) -> bool {
        if self.get(id).is_none() {
            debug!(id, "begin_edit: no such task");
            return false;
        }

        if let Some(previous) = &self.editing {
            debug!(previous = previous.task_id, id, "begin_edit: replacing edit session");
        }

        self.editing = Some(EditSession {
            task_id: id,
            draft: current_text.into(),
        });
        true
    }

    /// Replace the draft of the active edit session
    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.editing {
            Some(session) => {
                session.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Commit the draft verbatim into the task and end the edit session
    ///
    /// Returns true if a task was updated. The session is cleared even when
    /// the task has gone away.
    pub fn save_edit(&mut self, id: i64) -> bool {
        let Some(session) = self.editing.take() else {
            debug!(id, "save_edit: no edit session");
            return false;
        };

        if session.task_id != id {
            debug!(session = session.task_id, id, "save_edit: saving into a different task than the session's");
        }

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "save_edit: task no longer exists");
            return false;
        };

        task.text = session.draft;
        debug!(id, "save_edit: committed");

        self.persist();
        true
    }

    /// Drop the edit session without touching any task
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Remove a task. Returns false if no task has this id.
    pub fn delete_task(&mut self, id: i64) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "delete_task: no such task");
            return false;
        };

        self.tasks.remove(pos);
        if self.editing.as_ref().is_some_and(|s| s.task_id == id) {
            debug!(id, "delete_task: clearing edit session");
            self.editing = None;
        }

        self.persist();
        true
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn fresh_id(&mut self) -> Option<i64> {
        loop {
            let id = self.ids.next_id()?;
            if self.get(id).is_none() {
                return Some(id);
            }
            warn!(id, "Id generator returned an id already in use, retrying");
            self.ids.observe(id);
        }
    }

    /// Write the whole collection to the slot, logging on failure
    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            warn!(key = %self.key, error = ?e, "Failed to save tasks to storage");
        }
    }

    fn try_persist(&mut self) -> Result<()> {
        let data = encode_tasks(&self.tasks)?;
        self.storage.set(&self.key, &data)?;
        debug!(key = %self.key, count = self.tasks.len(), "Persisted tasks");
        Ok(())
    }
}
