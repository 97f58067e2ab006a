use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskId, TaskState};

/// Point-in-time occupancy of a queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    pub capacity: usize,
    pub waiting: usize,
    pub processing: usize,
    pub ready: usize,
    /// Task objects ever allocated.
    pub allocated: usize,
}

/// Read-only copy of a task's bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub state: TaskState,
    pub external_id: Option<String>,
    pub has_action: bool,
    pub has_params: bool,
}

impl From<&Task> for TaskSnapshot {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            state: task.state(),
            external_id: task.external_id().map(str::to_string),
            has_action: task.has_action(),
            has_params: task.params().is_some(),
        }
    }
}
