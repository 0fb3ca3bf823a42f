use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;
use snapsheet_core::{Scheduler, TaskId};

#[derive(Default)]
struct TimerState {
    next_id: TaskId,
    pending: HashMap<TaskId, Timeout>,
    // A timer's callback lives inside its `Timeout`, so fired timers are kept
    // until their callback has returned.
    fired: Vec<(TaskId, Timeout)>,
    running: Option<TaskId>,
}

impl TimerState {
    fn prune_fired(&mut self) {
        let running = self.running;
        self.fired.retain(|(id, _)| Some(*id) == running);
    }
}

impl Drop for TimerState {
    fn drop(&mut self) {
        // Dropped from inside a running callback: leak that one timer.
        if let Some(running) = self.running {
            if let Some(index) = self.fired.iter().position(|(id, _)| *id == running) {
                let (_, timeout) = self.fired.swap_remove(index);
                timeout.forget();
            }
        }
    }
}

/// Scheduler backed by `setTimeout`. Dropping it clears every pending timer.
#[derive(Default)]
pub struct TimeoutScheduler {
    state: Rc<RefCell<TimerState>>,
}

impl TimeoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

fn fire(state: &Weak<RefCell<TimerState>>, id: TaskId, task: Box<dyn FnOnce()>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    {
        let mut state = state.borrow_mut();
        let Some(timeout) = state.pending.remove(&id) else {
            return;
        };
        state.fired.push((id, timeout));
        state.running = Some(id);
    }
    task();
    // When the task dropped the scheduler, `running` stays set so the state's
    // drop below leaks this timer instead of freeing the executing callback.
    if Rc::strong_count(&state) > 1 {
        state.borrow_mut().running = None;
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_millis: u64, task: Box<dyn FnOnce()>) -> TaskId {
        let id = {
            let mut state = self.state.borrow_mut();
            state.prune_fired();
            state.next_id += 1;
            state.next_id
        };
        let weak = Rc::downgrade(&self.state);
        let millis = u32::try_from(delay_millis).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || fire(&weak, id, task));
        self.state.borrow_mut().pending.insert(id, timeout);
        id
    }

    fn cancel(&self, id: TaskId) {
        let removed = self.state.borrow_mut().pending.remove(&id);
        drop(removed);
    }
}
