//! The deferred-dispatch seam.
//!
//! Eventuals never run reactions inline. They hand a [`Task`] to a
//! [`Schedule`] implementation, which must run it after the current
//! synchronous segment and after every task it already holds. The host
//! supplies the implementation; [`EventLoop`](super::EventLoop) is the one
//! this crate ships.

use std::fmt;
use std::rc::Rc;

use super::Task;

/// A deferred-dispatch primitive.
///
/// Implementations must run tasks in the order they were enqueued and never
/// run a task from inside `enqueue`.
pub trait Schedule {
    /// Queues a task to run later.
    fn enqueue(&self, task: Task);
}

impl<S: Schedule + ?Sized> Schedule for Rc<S> {
    fn enqueue(&self, task: Task) {
        (**self).enqueue(task);
    }
}

/// Shared handle to a scheduler.
///
/// Every eventual keeps one and hands a clone to the eventuals derived from
/// it, so a whole chain dispatches through the same scheduler.
#[derive(Clone)]
pub struct Dispatcher {
    scheduler: Rc<dyn Schedule>,
}

impl Dispatcher {
    /// Wraps a scheduler.
    pub fn new<S>(scheduler: S) -> Self
    where
        S: Schedule + 'static,
    {
        Self {
            scheduler: Rc::new(scheduler),
        }
    }

    /// Wraps an already shared scheduler.
    #[must_use]
    pub fn from_rc(scheduler: Rc<dyn Schedule>) -> Self {
        Self { scheduler }
    }

    /// Queues a task on the underlying scheduler.
    pub fn enqueue(&self, task: Task) {
        self.scheduler.enqueue(task);
    }

    /// Queues a closure under the given label.
    pub fn defer<F>(&self, label: &'static str, run: F)
    where
        F: FnOnce() + 'static,
    {
        self.enqueue(Task::new(label, run));
    }

    /// Returns true if both handles share one scheduler.
    #[must_use]
    pub fn same_scheduler(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.scheduler, &other.scheduler)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        labels: RefCell<Vec<&'static str>>,
    }

    impl Schedule for Recorder {
        fn enqueue(&self, task: Task) {
            self.labels.borrow_mut().push(task.label());
        }
    }

    #[test]
    fn dispatcher_forwards_to_scheduler() {
        let recorder = Rc::new(Recorder::default());
        let dispatcher = Dispatcher::new(Rc::clone(&recorder));

        dispatcher.defer("first", || {});
        dispatcher.enqueue(Task::new("second", || {}));

        assert_eq!(*recorder.labels.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn clones_share_scheduler() {
        let dispatcher = Dispatcher::new(Recorder::default());
        let other = Dispatcher::new(Recorder::default());
        assert!(dispatcher.same_scheduler(&dispatcher.clone()));
        assert!(!dispatcher.same_scheduler(&other));
    }
}
