//! Fixed-size queue: admission, dedup and concurrency-limited dispatch.
//!
//! Design:
//! - `QueueState` is the single source of truth. Ring buffer, pool, the
//!   waiting index and the processing counter all live behind one
//!   `tokio::sync::Mutex`.
//! - The lock is held for a whole admission (validate -> buffer -> dispatch)
//!   and for a whole dispatch (dequeue -> Processing), and released before
//!   any action runs. Actions never see the lock.
//! - Completion re-takes the lock, recycles the task, and calls
//!   `dispatch_ready` again. Admissions and completions are the only
//!   triggers, so a queue with nothing in flight does not move on its own.
//!
//! Task lifecycle as seen from here:
//! - `admit`: Ready -> Waiting, indexed by external id, pushed to the buffer
//! - `next_dispatch`: Waiting -> Processing, index entry dropped
//! - `finish`: Processing -> Ready, back on the free-list

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::pool::TaskPool;
use super::{QueueConfig, RingBuffer};
use crate::action::TaskAction;
use crate::domain::{ActionCall, TaskHandle, TaskId, TaskParams};
use crate::error::{AdmissionError, TaskError};
use crate::observability::{QueueCounts, TaskSnapshot};

/// Bookkeeping shared by admission and completion.
///
/// Invariant: a key is in `waiting` iff the task it points to is Waiting,
/// i.e. sitting in `buffer`.
struct QueueState {
    running: bool,
    buffer: RingBuffer<TaskHandle>,
    pool: TaskPool,
    waiting: HashMap<String, TaskHandle>,
    processing: usize,
    max_processing: usize,
}

/// A task that has been moved to Processing and must be run.
struct Dispatch {
    handle: TaskHandle,
    task_id: TaskId,
    external_id: String,
    call: Result<ActionCall, TaskError>,
}

impl QueueState {
    fn new(capacity: usize, max_processing: usize) -> Self {
        Self {
            running: false,
            buffer: RingBuffer::new(capacity),
            pool: TaskPool::new(capacity, capacity.saturating_add(max_processing)),
            waiting: HashMap::new(),
            processing: 0,
            max_processing,
        }
    }

    fn validate_external_id(&self, external_id: &str) -> Result<(), AdmissionError> {
        if external_id.trim().is_empty() {
            return Err(AdmissionError::InvalidId);
        }
        if self.waiting.contains_key(external_id) {
            return Err(AdmissionError::DuplicateId(external_id.to_string()));
        }
        Ok(())
    }

    /// Admission, checked in this order:
    /// 1. queue is running (`NotRunning`)
    /// 2. buffer has room (`CapacityExceeded`), before anything is touched
    /// 3. external id is non-blank and not already waiting
    ///
    /// An unset action or params is accepted; dispatch skips such a task.
    fn admit(
        &mut self,
        queue: &str,
        action: Option<Arc<dyn TaskAction>>,
        params: Option<TaskParams>,
        external_id: &str,
    ) -> Result<TaskId, AdmissionError> {
        if !self.running {
            return Err(AdmissionError::NotRunning {
                queue: queue.to_string(),
            });
        }
        if self.buffer.is_full() {
            return Err(AdmissionError::CapacityExceeded {
                queue: queue.to_string(),
            });
        }
        self.validate_external_id(external_id)?;

        let handle = self.pool.obtain();
        let task = self.pool.get_mut(handle);
        task.set_action(action);
        task.set_params(params);
        task.set_external_id(external_id);
        task.set_waiting();
        let task_id = task.id();

        self.waiting.insert(external_id.to_string(), handle);
        self.buffer
            .enqueue(handle)
            .expect("ring buffer must have room after the capacity check");
        Ok(task_id)
    }

    /// Move the head of the buffer to Processing if a slot is free.
    fn next_dispatch(&mut self) -> Option<Dispatch> {
        if self.processing >= self.max_processing {
            return None;
        }
        let handle = self.buffer.dequeue()?;

        let task = self.pool.get_mut(handle);
        debug_assert!(
            task.state().holds_external_id(),
            "buffered task {} is not Waiting",
            task.id()
        );
        let external_id = task.external_id().unwrap_or_default().to_string();
        task.set_processing();
        let task_id = task.id();
        let call = task.prepare_call();

        self.waiting.remove(&external_id);
        self.processing += 1;
        Some(Dispatch {
            handle,
            task_id,
            external_id,
            call,
        })
    }

    /// Start as much waiting work as the concurrency limit allows.
    fn dispatch_ready(&mut self) -> Vec<Dispatch> {
        let mut started = Vec::new();
        while let Some(dispatch) = self.next_dispatch() {
            started.push(dispatch);
        }
        started
    }

    fn finish(&mut self, handle: TaskHandle) {
        self.pool.release(handle);
        self.processing = self.processing.saturating_sub(1);
    }

    fn counts(&self) -> QueueCounts {
        QueueCounts {
            capacity: self.buffer.capacity(),
            waiting: self.buffer.len(),
            processing: self.processing,
            ready: self.pool.ready_len(),
            allocated: self.pool.allocated(),
        }
    }
}

/// Bounded task queue.
///
/// Cloning yields another handle to the same queue.
///
/// Design intent:
/// - `add` validates, buffers and tries to dispatch under one lock.
/// - Actions run on their own tokio tasks, outside the lock.
/// - Each completion recycles its task and tries to dispatch again, so waiting
///   work drains as slots free up.
#[derive(Clone)]
pub struct FixedSizeQueue {
    name: Arc<str>,
    max_concurrency: usize,
    state: Arc<Mutex<QueueState>>,
}

impl FixedSizeQueue {
    /// Create a stopped queue. A `capacity` below 1 is clamped to 1.
    pub fn new(capacity: usize, name: impl Into<String>, max_concurrency: usize) -> Self {
        let capacity = capacity.max(1);
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            max_concurrency,
            state: Arc::new(Mutex::new(QueueState::new(capacity, max_concurrency))),
        }
    }

    pub fn from_config(config: &QueueConfig) -> Self {
        Self::new(
            config.effective_capacity(),
            config.name.clone(),
            config.max_concurrency,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn capacity(&self) -> usize {
        self.state.lock().await.buffer.capacity()
    }

    /// Open the queue for admissions.
    ///
    /// Tasks already waiting are not dispatched by this call; they move on
    /// the next `add` or completion.
    pub async fn start(&self) {
        self.state.lock().await.running = true;
        info!(queue = %self.name, "queue started");
    }

    /// Close the queue for admissions. Running and waiting work is untouched.
    pub async fn stop(&self) {
        self.state.lock().await.running = false;
        info!(queue = %self.name, "queue stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.running
    }

    /// Admit a task and try to start it.
    ///
    /// Fire-and-forget: `Ok(())` only means the task was accepted. An unset
    /// action or params is accepted here and skipped when the task is
    /// dispatched.
    ///
    /// # Arguments
    /// * `action` - work to run; `None` is accepted and skipped at dispatch
    /// * `params` - bundle passed to the action; `None` behaves like `action`
    /// * `external_id` - caller's dedup key while the task is Waiting
    ///
    /// # Errors
    /// * `NotRunning` - `start` has not been called, or `stop` has
    /// * `CapacityExceeded` - the buffer already holds `capacity` tasks
    /// * `InvalidId` - `external_id` is empty or only whitespace
    /// * `DuplicateId` - a task with this external id is still Waiting
    ///
    /// # Design note
    /// A task that already moved to Processing no longer blocks its external
    /// id, so the same id can be admitted again while the first run is in
    /// flight. Nothing is allocated on a rejected call.
    pub async fn add(
        &self,
        action: impl Into<Option<Arc<dyn TaskAction>>>,
        params: impl Into<Option<TaskParams>>,
        external_id: &str,
    ) -> Result<(), AdmissionError> {
        let action = action.into();
        let params = params.into();

        let started = {
            let mut state = self.state.lock().await;
            let task_id = state.admit(&self.name, action, params, external_id)?;
            debug!(queue = %self.name, %task_id, %external_id, "task admitted");
            state.dispatch_ready()
        };

        for dispatch in started {
            spawn_dispatch(Arc::clone(&self.name), Arc::clone(&self.state), dispatch);
        }
        Ok(())
    }

    pub async fn counts(&self) -> QueueCounts {
        self.state.lock().await.counts()
    }

    /// Look up a task object by its internal id.
    pub async fn task(&self, id: TaskId) -> Option<TaskSnapshot> {
        let state = self.state.lock().await;
        state.pool.find(id).map(TaskSnapshot::from)
    }

    /// Is a task with this external id currently waiting?
    pub async fn is_waiting(&self, external_id: &str) -> bool {
        self.state.lock().await.waiting.contains_key(external_id)
    }
}

/// Run a dispatched action on its own task, then recycle it and keep draining.
fn spawn_dispatch(name: Arc<str>, state: Arc<Mutex<QueueState>>, dispatch: Dispatch) {
    let Dispatch {
        handle,
        task_id,
        external_id,
        call,
    } = dispatch;
    debug!(queue = %name, %task_id, %external_id, "task dispatched");

    tokio::spawn(async move {
        match call {
            // Nested spawn so a panicking action still frees its slot.
            Ok(call) => match tokio::spawn(call.invoke()).await {
                Ok(Ok(())) => {
                    debug!(queue = %name, %task_id, %external_id, "task action finished")
                }
                Ok(Err(err)) => {
                    warn!(queue = %name, %task_id, %external_id, error = %err, "task action failed")
                }
                Err(err) => {
                    error!(queue = %name, %task_id, %external_id, error = %err, "task action panicked")
                }
            },
            Err(err) => {
                warn!(queue = %name, %task_id, %external_id, error = %err, "task skipped")
            }
        }

        let next = {
            let mut state = state.lock().await;
            state.finish(handle);
            state.dispatch_ready()
        };
        for dispatch in next {
            spawn_dispatch(Arc::clone(&name), Arc::clone(&state), dispatch);
        }
    });
}
