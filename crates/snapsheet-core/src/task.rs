use std::rc::Rc;

use crate::platform::{Scheduler, TaskId};

/// A scheduled callback that is cancelled when the registration is dropped.
///
/// Dropping a registration whose task already ran is harmless: schedulers
/// ignore cancellation of finished ids.
pub struct DelayedTask {
    scheduler: Rc<dyn Scheduler>,
    id: Option<TaskId>,
}

impl DelayedTask {
    pub fn schedule(
        scheduler: &Rc<dyn Scheduler>,
        delay_millis: u64,
        task: impl FnOnce() + 'static,
    ) -> Self {
        let id = scheduler.schedule(delay_millis, Box::new(task));
        Self {
            scheduler: Rc::clone(scheduler),
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct QueueScheduler {
        next: Cell<TaskId>,
        queued: RefCell<Vec<(TaskId, Box<dyn FnOnce()>)>>,
        cancelled: RefCell<Vec<TaskId>>,
    }

    impl QueueScheduler {
        fn run_all(&self) {
            let tasks: Vec<_> = self.queued.borrow_mut().drain(..).collect();
            for (_, task) in tasks {
                task();
            }
        }
    }

    impl Scheduler for QueueScheduler {
        fn schedule(&self, _delay_millis: u64, task: Box<dyn FnOnce()>) -> TaskId {
            let id = self.next.get() + 1;
            self.next.set(id);
            self.queued.borrow_mut().push((id, task));
            id
        }

        fn cancel(&self, id: TaskId) {
            self.cancelled.borrow_mut().push(id);
            self.queued.borrow_mut().retain(|(queued, _)| *queued != id);
        }
    }

    #[test]
    fn drop_cancels_pending_task() {
        let queue = Rc::new(QueueScheduler::default());
        let scheduler: Rc<dyn Scheduler> = queue.clone();
        let ran = Rc::new(Cell::new(false));
        {
            let ran = Rc::clone(&ran);
            let _task = DelayedTask::schedule(&scheduler, 200, move || ran.set(true));
        }
        queue.run_all();
        assert!(!ran.get());
        assert_eq!(queue.cancelled.borrow().as_slice(), &[1]);
    }

    #[test]
    fn explicit_cancel_happens_once() {
        let queue = Rc::new(QueueScheduler::default());
        let scheduler: Rc<dyn Scheduler> = queue.clone();
        let task = DelayedTask::schedule(&scheduler, 10, || {});
        assert_eq!(task.id(), Some(1));
        task.cancel();
        assert_eq!(queue.cancelled.borrow().len(), 1);
    }

    #[test]
    fn kept_registration_lets_task_run() {
        let queue = Rc::new(QueueScheduler::default());
        let scheduler: Rc<dyn Scheduler> = queue.clone();
        let ran = Rc::new(Cell::new(false));
        let task = {
            let ran = Rc::clone(&ran);
            DelayedTask::schedule(&scheduler, 200, move || ran.set(true))
        };
        queue.run_all();
        assert!(ran.get());
        drop(task);
    }
}
