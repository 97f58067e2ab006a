//! Task lifecycle state.

use serde::{Deserialize, Serialize};

/// State of a task object.
///
/// State transitions (driven by the queue, never by the task itself):
/// - Ready -> Waiting (admitted into the ring buffer)
/// - Waiting -> Processing (dispatched, action running)
/// - Processing -> Ready (action returned, task cleaned and pooled)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Clean and reusable.
    #[default]
    Ready,

    /// Admitted and sitting in the buffer.
    Waiting,

    /// Action currently executing.
    Processing,
}

impl TaskState {
    /// Is the task's external id reserved against duplicates?
    pub fn holds_external_id(self) -> bool {
        matches!(self, TaskState::Waiting)
    }

    /// Can the task object be handed out for a new admission?
    pub fn is_reusable(self) -> bool {
        matches!(self, TaskState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_waiting_holds_external_id() {
        assert!(!TaskState::Ready.holds_external_id());
        assert!(TaskState::Waiting.holds_external_id());
        assert!(!TaskState::Processing.holds_external_id());
    }

    #[test]
    fn default_is_ready() {
        assert_eq!(TaskState::default(), TaskState::Ready);
        assert!(TaskState::default().is_reusable());
    }
}
