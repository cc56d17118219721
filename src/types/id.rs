//! Identifier types for eventuals and dispatched tasks.
//!
//! Identifiers exist for diagnostics only: they label log events and
//! dispatch trace records. Nothing in the settlement protocol compares them.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EVENTUAL_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for an [`Eventual`](crate::Eventual).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventualId(u64);

impl EventualId {
    /// Allocates the next identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_EVENTUAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a fixed identifier for testing purposes.
    #[doc(hidden)]
    #[must_use]
    pub const fn new_for_test(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EventualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventualId({})", self.0)
    }
}

impl fmt::Display for EventualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A process-unique identifier for a dispatched [`Task`](crate::runtime::Task).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Allocates the next identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a fixed identifier for testing purposes.
    #[doc(hidden)]
    #[must_use]
    pub const fn new_for_test(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let a = EventualId::next();
        let b = EventualId::next();
        assert!(b > a);

        let t1 = TaskId::next();
        let t2 = TaskId::next();
        assert!(t2 > t1);
    }

    #[test]
    fn display_and_debug_formats() {
        let id = EventualId::new_for_test(7);
        assert_eq!(id.to_string(), "E7");
        assert_eq!(format!("{id:?}"), "EventualId(7)");

        let task = TaskId::new_for_test(3);
        assert_eq!(task.to_string(), "T3");
        assert_eq!(format!("{task:?}"), "TaskId(3)");
        assert_eq!(task.as_u64(), 3);
    }
}
