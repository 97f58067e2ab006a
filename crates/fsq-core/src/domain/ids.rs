//! Task identifiers.
//!
//! There are three ways to name a task, and they are deliberately separate:
//! - `TaskId`: permanent identity of a task *object*. Handed out
//!   monotonically from 1 when the object is first allocated and kept across
//!   every reuse. Used for diagnostics (`FixedSizeQueue::task`).
//! - `TaskHandle`: slot index into the pool's arena. Crate-internal; it is
//!   what the ring buffer and the waiting index actually store.
//! - external id: the caller's `&str` label. Not a type here; it only lives
//!   on the task while admitted and is the dedup key while Waiting.
//!
//! `TaskId` and `TaskHandle` are newtypes so the two integers cannot be mixed
//! up. Both are `Copy` and cost nothing over the raw integer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permanent internal id of a task object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Index of a task in the pool's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TaskHandle(usize);

impl TaskHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}
