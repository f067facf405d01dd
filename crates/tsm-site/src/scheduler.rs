//! Deferred callbacks and time abstraction
//!
//! Everything time-based in the page (toast exit and removal) goes through
//! [`Scheduler`]. The browser front end backs it with `setTimeout`; tests use
//! [`ManualScheduler`], a fake clock that only moves when told to.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::types::TimerHandle;

/// A deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Timer queue capability.
///
/// Tasks run on the same thread as the caller, never re-entrantly inside
/// `schedule`.
pub trait Scheduler {
    /// Milliseconds on this scheduler's clock.
    fn now_ms(&self) -> f64;

    /// Run `task` once, `delay_ms` from now.
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle;

    /// Cancel a pending task. Returns false if it already ran or is unknown.
    fn cancel(&self, handle: TimerHandle) -> bool;
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Due tasks run ordered by due time, then by scheduling order. A task
/// scheduled by a running task fires within the same `advance` call if its
/// due time falls inside the advanced window.
pub struct ManualScheduler {
    now: Cell<f64>,
    next_handle: Cell<u64>,
    /// (due time in whole ms, handle) -> task
    queue: RefCell<BTreeMap<(u64, TimerHandle), Task>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0.0),
            next_handle: Cell::new(1),
            queue: RefCell::new(BTreeMap::new()),
        }
    }

    /// Move the clock forward by `ms`, firing everything that comes due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now.get() as u64 + ms;
        let mut ran = 0;

        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                match queue.keys().next().copied() {
                    Some(key) if key.0 <= target => queue.remove(&key).map(|task| (key.0, task)),
                    _ => None,
                }
            };
            let Some((due, task)) = next else {
                break;
            };
            self.now.set(due as f64);
            task();
            ran += 1;
        }

        self.now.set(target as f64);
        ran
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Due time of the earliest waiting task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.borrow().keys().next().map(|(due, _)| *due)
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        let due = self.now.get() as u64 + u64::from(delay_ms);
        self.queue.borrow_mut().insert((due, handle), task);
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut queue = self.queue.borrow_mut();
        let key = queue.keys().find(|(_, h)| *h == handle).copied();
        key.and_then(|k| queue.remove(&k)).is_some()
    }
}
