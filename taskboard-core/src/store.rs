//! In-memory task store.
//!
//! `TaskStore` is the only place the task collection is mutated. Every
//! operation is total: unknown identifiers are ignored and reorder indices
//! are clamped into range, so callers driven by continuous pointer input
//! never have to pre-validate.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::task::{Task, TaskId};

/// Ordered collection of tasks for the current session.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// Next identifier to hand out. Only ever increases.
    next_id: u64,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current timestamp in milliseconds since epoch.
    fn now_ms() -> u64 {
        u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        )
        .unwrap_or(u64::MAX)
    }

    /// Appends a new open task and returns its identifier.
    ///
    /// Empty titles and descriptions are accepted as-is.
    pub fn add_task(&mut self, title: impl Into<String>, description: impl Into<String>) -> TaskId {
        self.next_id += 1;
        let id = TaskId::from_raw(self.next_id);
        let task = Task::new(id, title.into(), description.into(), Self::now_ms());
        tracing::debug!(%id, len = self.tasks.len() + 1, "task added");
        self.tasks.push(task);
        id
    }

    /// Flips the `completed` flag of the task with the given id.
    ///
    /// Returns `false` (and changes nothing) if no such task exists.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(%id, "toggle ignored, task not found");
            return false;
        };
        task.completed = !task.completed;
        tracing::debug!(%id, completed = task.completed, "task toggled");
        true
    }

    /// Removes the task with the given id, keeping the order of the rest.
    ///
    /// Returns the removed task, or `None` if no such task exists.
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        let task = self.tasks.remove(index);
        tracing::debug!(%id, index, "task deleted");
        Some(task)
    }

    /// Moves the task at `from` so that it ends up at index `to`.
    ///
    /// Both indices are clamped to `[0, len - 1]`. Does nothing on an empty
    /// store or when the clamped indices are equal.
    pub fn reorder_task(&mut self, from: usize, to: usize) {
        let Some(last) = self.tasks.len().checked_sub(1) else {
            return;
        };
        let from = from.min(last);
        let to = to.min(last);
        if from == to {
            return;
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        tracing::debug!(from, to, "task reordered");
    }

    /// All tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterates over tasks in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Current index of the task with the given id.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
