//! Task: the reusable unit the queue admits, runs and recycles.
//!
//! Design:
//! - A `Task` is never dropped while its pool lives; `clean()` wipes the
//!   per-admission fields (action, params, external id) and keeps `id`.
//! - State setters are unconditional. Legal transitions are the queue's job.
//! - Running an action happens outside the queue lock, so `prepare_call`
//!   clones the two `Arc`s into an owned `ActionCall` that can be moved onto
//!   its own tokio task.
//!
//! Unset action or params is a valid stored state. It is only rejected at
//! call time, as `TaskError::InvalidTaskState`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{TaskId, TaskState};
use crate::action::TaskAction;
use crate::error::TaskError;

/// Opaque parameter bundle handed to a task's action.
pub type TaskParams = HashMap<String, serde_json::Value>;

/// A reusable unit of deferred work.
///
/// The internal `id` is fixed for the lifetime of the object. Everything else
/// is per-admission and wiped by `clean()` before the object is pooled.
pub struct Task {
    id: TaskId,
    state: TaskState,
    action: Option<Arc<dyn TaskAction>>,
    params: Option<Arc<TaskParams>>,
    external_id: Option<String>,
}

impl Task {
    pub(crate) fn new(id: TaskId) -> Self {
        Self {
            id,
            state: TaskState::Ready,
            action: None,
            params: None,
            external_id: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn params(&self) -> Option<&TaskParams> {
        self.params.as_deref()
    }

    pub fn set_ready(&mut self) {
        self.state = TaskState::Ready;
    }

    pub fn set_waiting(&mut self) {
        self.state = TaskState::Waiting;
    }

    pub fn set_processing(&mut self) {
        self.state = TaskState::Processing;
    }

    pub fn set_action(&mut self, action: Option<Arc<dyn TaskAction>>) {
        self.action = action;
    }

    pub fn set_params(&mut self, params: Option<TaskParams>) {
        self.params = params.map(Arc::new);
    }

    pub fn set_external_id(&mut self, external_id: impl Into<String>) {
        self.external_id = Some(external_id.into());
    }

    /// Back to Ready with action, params and external id cleared.
    pub fn clean(&mut self) {
        self.set_ready();
        self.action = None;
        self.params = None;
        self.external_id = None;
    }

    /// Detach what is needed to run the action outside the queue lock.
    ///
    /// Fails with `InvalidTaskState` when either the action or the params
    /// are unset; the action is then never called.
    pub fn prepare_call(&self) -> Result<ActionCall, TaskError> {
        match (&self.action, &self.params) {
            (Some(action), Some(params)) => Ok(ActionCall {
                action: Arc::clone(action),
                params: Arc::clone(params),
            }),
            _ => Err(TaskError::InvalidTaskState),
        }
    }

    /// Invoke the action with the task's params and return its result verbatim.
    pub async fn call_action(&self) -> Result<(), TaskError> {
        self.prepare_call()?.invoke().await
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("has_action", &self.action.is_some())
            .field("params", &self.params)
            .field("external_id", &self.external_id)
            .finish()
    }
}

/// An action paired with its params, owned so it can run on its own task.
pub struct ActionCall {
    action: Arc<dyn TaskAction>,
    params: Arc<TaskParams>,
}

impl ActionCall {
    pub async fn invoke(self) -> Result<(), TaskError> {
        self.action.call(&self.params).await.map_err(TaskError::from)
    }
}
