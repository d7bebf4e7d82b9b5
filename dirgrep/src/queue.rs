//! Bounded work queue bridging the directory walker to the scanner workers.
//!
//! One logical producer, many consumers. The queue caps how many pending
//! paths can sit in memory at once, so an arbitrarily deep tree never grows
//! the working set beyond `capacity` entries plus whatever the workers hold.
//! "Finished" is an explicit signal distinct from "temporarily empty":
//! consumers keep blocking on an empty queue until the producer marks it
//! finished.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Default maximum number of pending paths held in memory.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<PathBuf>,
    finished: bool,
}

/// Thread-safe, capacity-limited FIFO of pending file paths.
#[derive(Debug)]
pub struct BoundedPathQueue {
    state: Mutex<QueueState>,
    space_available: Condvar,
    item_available: Condvar,
    capacity: usize,
}

impl BoundedPathQueue {
    /// Creates a queue holding at most `capacity` paths (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            space_available: Condvar::new(),
            item_available: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().expect("queue lock poisoned")
    }

    /// Enqueues a path, blocking while the queue is full.
    ///
    /// Returns `false` without enqueuing if the queue was marked finished,
    /// including while the caller was blocked waiting for space.
    pub fn push(&self, path: PathBuf) -> bool {
        let mut state = self.lock();
        while state.items.len() >= self.capacity && !state.finished {
            state = self
                .space_available
                .wait(state)
                .expect("queue lock poisoned");
        }
        if state.finished {
            return false;
        }
        state.items.push_back(path);
        self.item_available.notify_one();
        true
    }

    /// Dequeues a path, blocking while the queue is empty and not finished.
    ///
    /// Returns `None` only when the queue is empty AND finished, i.e. no
    /// more work will ever arrive.
    pub fn pop(&self) -> Option<PathBuf> {
        let mut state = self.lock();
        while state.items.is_empty() && !state.finished {
            state = self
                .item_available
                .wait(state)
                .expect("queue lock poisoned");
        }
        let item = state.items.pop_front();
        if item.is_some() {
            self.space_available.notify_one();
        }
        item
    }

    /// Signals that no more items will ever be pushed. Idempotent; wakes all
    /// blocked producers and consumers.
    pub fn mark_finished(&self) {
        let mut state = self.lock();
        state.finished = true;
        self.space_available.notify_all();
        self.item_available.notify_all();
    }

    /// Advisory snapshot for monitoring only. Consumers must rely on the
    /// `pop` contract, not on this.
    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }

    /// Advisory snapshot for monitoring only.
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Advisory snapshot for monitoring only.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }
}
