//! Fixed-capacity circular FIFO.
//!
//! Backs the queue's waiting line. Storage is allocated once in `new` and
//! never grows; a full buffer rejects instead of overwriting, which is what
//! turns into `AdmissionError::CapacityExceeded` one layer up.
//!
//! State transitions (capacity 2):
//! ```text
//! empty  --enqueue-->  len 1  --enqueue-->  full
//!   ^                   |  ^                  |
//!   +-----dequeue-------+  +----dequeue-------+
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("can't enqueue, ring buffer is full")]
pub struct RingBufferFull;

/// Fixed-capacity FIFO with O(1) enqueue/dequeue.
///
/// Invariants:
/// - `len` is in `[0, capacity]`
/// - `full` iff `len == capacity`
/// - `head` and `tail` are always in `[0, capacity)`
///
/// No synchronization of its own; the owner serializes access.
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    len: usize,
    head: usize,
    /// Slot written by the most recent enqueue.
    tail: usize,
    full: bool,
}

impl<T> RingBuffer<T> {
    /// Create a buffer holding up to `capacity` items (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            len: 0,
            head: 0,
            tail: 0,
            full: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn enqueue(&mut self, item: T) -> Result<(), RingBufferFull> {
        let capacity = self.capacity();
        if self.len == capacity {
            return Err(RingBufferFull);
        }

        self.tail = (self.head + self.len) % capacity;
        self.slots[self.tail] = Some(item);
        self.len += 1;
        if self.len == capacity {
            self.full = true;
        }
        Ok(())
    }

    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let item = self.slots[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        self.full = false;
        item
    }
}
