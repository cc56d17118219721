//! Task type for deferred dispatch.
//!
//! `Task` wraps a type-erased callback that a scheduler runs later, after
//! the current synchronous segment. Each task carries a `TaskId` and a
//! static label so dispatch order can be inspected.

use std::fmt;

use crate::types::TaskId;

/// Label of the task that delivers a settlement to its queued reactions.
pub const SETTLE_BATCH: &str = "settle-batch";

/// Label of the task that delivers a known outcome to a reaction attached
/// after settlement.
pub const LATE_REACTION: &str = "late-reaction";

/// A type-erased callback awaiting dispatch.
pub struct Task {
    id: TaskId,
    label: &'static str,
    run: Box<dyn FnOnce()>,
}

impl Task {
    /// Creates a new task with a fresh id.
    pub fn new<F>(label: &'static str, run: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            id: TaskId::next(),
            label,
            run: Box::new(run),
        }
    }

    /// Returns the task id.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Runs the task, consuming it.
    pub fn run(self) {
        (self.run)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
