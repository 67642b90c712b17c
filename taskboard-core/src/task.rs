//! Task record types.

use serde::{Deserialize, Serialize};

/// Identifier of a task, assigned by [`TaskStore`](crate::TaskStore).
///
/// Identifiers increase monotonically within a session and are never
/// reused, even after the task they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Short title, shown in bold.
    pub title: String,
    /// Free-form description shown under the title.
    pub description: String,
    /// Whether the task has been checked off.
    pub completed: bool,
    /// Wall-clock creation time in milliseconds since the Unix epoch.
    pub created_at_ms: u64,
}

impl Task {
    /// Creates an open task.
    #[must_use]
    pub fn new(id: TaskId, title: String, description: String, created_at_ms: u64) -> Self {
        Self {
            id,
            title,
            description,
            completed: false,
            created_at_ms,
        }
    }
}
