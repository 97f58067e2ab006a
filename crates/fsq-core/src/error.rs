use thiserror::Error;

/// Reasons `FixedSizeQueue::add` turns a task away.
///
/// Always returned synchronously to the caller of `add`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("queue {queue} is not running, start it before adding tasks")]
    NotRunning { queue: String },

    #[error("queue {queue} has no capacity at this time, try later")]
    CapacityExceeded { queue: String },

    #[error("task id is not valid, it is empty or only whitespace")]
    InvalidId,

    #[error("task id {0:?} is already waiting to be processed")]
    DuplicateId(String),
}

/// Failure reported by a task's own action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of calling a task's action.
///
/// `InvalidTaskState` means the action was never called; `Action` carries
/// the action's own failure verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task action and/or params are unset, cannot make call")]
    InvalidTaskState,

    #[error(transparent)]
    Action(#[from] ActionError),
}
