//! Task arena + LIFO free-list.
//!
//! Design:
//! - Task objects live in an arena and are addressed by `TaskHandle`.
//! - The free-list holds handles of cleaned (Ready) tasks only.
//! - The arena grows on demand and never shrinks; a task object persists as
//!   long as the pool.
//! - Growth is bounded by `limit` (buffer capacity + concurrency limit): a task
//!   object only exists while Waiting, Processing or pooled, and the pool is
//!   drained before anything new is allocated.

use std::collections::HashMap;

use crate::domain::{Task, TaskHandle, TaskId};

pub(crate) struct TaskPool {
    /// Every task ever allocated, indexed by handle.
    tasks: Vec<Task>,

    /// Internal id -> handle, for lookups.
    by_id: HashMap<TaskId, TaskHandle>,

    /// Cleaned tasks available for reuse (LIFO).
    ready: Vec<TaskHandle>,

    /// Next internal id to assign.
    next_id: u64,

    /// Most task objects that can ever be live at once.
    limit: usize,
}

impl TaskPool {
    /// `initial` slots are reserved up front; `limit` is only checked.
    pub(crate) fn new(initial: usize, limit: usize) -> Self {
        let initial = initial.min(limit);
        Self {
            tasks: Vec::with_capacity(initial),
            by_id: HashMap::with_capacity(initial),
            ready: Vec::with_capacity(initial),
            next_id: 1,
            limit,
        }
    }

    /// Pop the most recently released task, if any.
    pub(crate) fn acquire(&mut self) -> Option<TaskHandle> {
        let handle = self.ready.pop()?;
        debug_assert!(
            self.get(handle).state().is_reusable(),
            "pooled task {} is not Ready",
            self.get(handle).id()
        );
        Some(handle)
    }

    /// Allocate a fresh task with the next internal id and register it.
    pub(crate) fn allocate(&mut self) -> TaskHandle {
        debug_assert!(
            self.tasks.len() < self.limit,
            "task pool grew past its limit of {}",
            self.limit
        );

        let id = TaskId::new(self.next_id);
        self.next_id += 1;

        let handle = TaskHandle::new(self.tasks.len());
        self.tasks.push(Task::new(id));
        self.by_id.insert(id, handle);
        handle
    }

    /// Reuse a pooled task if there is one, otherwise allocate.
    pub(crate) fn obtain(&mut self) -> TaskHandle {
        match self.acquire() {
            Some(handle) => handle,
            None => self.allocate(),
        }
    }

    /// Clean the task and push it onto the free-list.
    pub(crate) fn release(&mut self, handle: TaskHandle) {
        self.get_mut(handle).clean();
        self.ready.push(handle);
    }

    pub(crate) fn get(&self, handle: TaskHandle) -> &Task {
        &self.tasks[handle.index()]
    }

    pub(crate) fn get_mut(&mut self, handle: TaskHandle) -> &mut Task {
        &mut self.tasks[handle.index()]
    }

    pub(crate) fn find(&self, id: TaskId) -> Option<&Task> {
        self.by_id.get(&id).map(|&handle| self.get(handle))
    }

    /// Number of task objects ever allocated.
    pub(crate) fn allocated(&self) -> usize {
        self.tasks.len()
    }

    /// Number of tasks sitting in the free-list.
    pub(crate) fn ready_len(&self) -> usize {
        self.ready.len()
    }
}
