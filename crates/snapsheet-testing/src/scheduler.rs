use std::cell::RefCell;
use std::rc::Rc;

use snapsheet_core::{Scheduler, TaskId};

struct PendingTask {
    id: TaskId,
    due: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_id: TaskId,
    pending: Vec<PendingTask>,
}

/// Scheduler driven by a virtual clock.
///
/// Nothing runs until the test advances time. Tasks due at the same instant run
/// in the order they were scheduled, and tasks scheduled by a running task are
/// picked up by the same `advance_by` call when they fall inside its window.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ClockState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Advances the clock by `millis`, running every task that falls due.
    /// Returns the number of tasks run.
    pub fn advance_by(&self, millis: u64) -> usize {
        let target = self.now() + millis;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        self.state.borrow_mut().now = target;
        ran
    }

    /// Runs every pending task, moving the clock to the last due time.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next_due = self.state.borrow().pending.iter().map(|p| p.due).min();
            let Some(due) = next_due else {
                return ran;
            };
            let now = self.now();
            ran += self.advance_by(due.saturating_sub(now));
        }
    }

    fn pop_due(&self, target: u64) -> Option<Box<dyn FnOnce()>> {
        let mut state = self.state.borrow_mut();
        let index = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= target)
            .min_by_key(|(_, pending)| (pending.due, pending.id))
            .map(|(index, _)| index)?;
        let pending = state.pending.remove(index);
        state.now = pending.due;
        Some(pending.task)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_millis: u64, task: Box<dyn FnOnce()>) -> TaskId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let due = state.now + delay_millis;
        state.pending.push(PendingTask { id, due, task });
        id
    }

    fn cancel(&self, id: TaskId) {
        self.state
            .borrow_mut()
            .pending
            .retain(|pending| pending.id != id);
    }
}
