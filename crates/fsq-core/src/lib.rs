//! fsq-core
//!
//! A fixed-size task queue: admits tasks, deduplicates them by a caller-chosen
//! id while they wait, and runs them concurrently up to a fixed limit.
//!
//! # Modules
//! - **domain**: task model (ids, state, task)
//! - **action**: the `TaskAction` seam that callers implement
//! - **queue**: ring buffer, task pool, config and the `FixedSizeQueue` dispatcher
//! - **error**: admission and execution errors
//! - **observability**: read-only views (counts, task snapshots)
//!
//! Admission is fire-and-forget: `add` reports whether the task was accepted,
//! never how its action turned out.

pub mod action;
pub mod domain;
pub mod error;
pub mod observability;
pub mod queue;

pub use action::{TaskAction, action_fn};
pub use domain::{TaskId, TaskParams, TaskState};
pub use error::{ActionError, AdmissionError, TaskError};
pub use queue::{FixedSizeQueue, QueueConfig, RingBuffer};
