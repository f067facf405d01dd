//! `setTimeout` backed [`Scheduler`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tsm_site::{Scheduler, Task, TimerHandle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// A timer the browser still owes us. Dropping it frees the JS callback.
struct PendingTimer {
    timeout_id: i32,
    _callback: Closure<dyn FnMut()>,
}

type PendingTimers = RefCell<BTreeMap<TimerHandle, PendingTimer>>;

pub struct WebScheduler {
    window: Window,
    next_handle: Cell<u64>,
    pending: Rc<PendingTimers>,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_handle: Cell::new(1),
            pending: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    /// Timers scheduled but neither fired nor cancelled
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Scheduler for WebScheduler {
    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);

        let pending: Weak<PendingTimers> = Rc::downgrade(&self.pending);
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            // Held until the task returns; the JS glue defers freeing a
            // closure dropped during its own call.
            let fired = pending
                .upgrade()
                .and_then(|pending| pending.borrow_mut().remove(&handle));
            task();
            drop(fired);
        });

        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        ) {
            Ok(timeout_id) => {
                self.pending.borrow_mut().insert(
                    handle,
                    PendingTimer {
                        timeout_id,
                        _callback: callback,
                    },
                );
            }
            Err(e) => tracing::warn!("[scheduler] setTimeout failed: {:?}", e),
        }
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let Some(timer) = self.pending.borrow_mut().remove(&handle) else {
            return false;
        };
        self.window.clear_timeout_with_handle(timer.timeout_id);
        true
    }
}
