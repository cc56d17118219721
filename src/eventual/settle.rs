//! Settlement capability handed to initiators.

use std::fmt;
use std::rc::Rc;

use super::{Eventual, Handled, Inner, Resolution};
use crate::tracing_compat::{trace, warn};
use crate::types::{EventualId, Panicked};

/// The right to settle one eventual.
///
/// Clones share the target. Only the first settlement or adoption has any
/// effect; later calls return `false` and change nothing.
pub struct Settle<T, E> {
    target: Rc<Inner<T, E>>,
}

impl<T, E> Settle<T, E> {
    pub(super) fn new(target: Rc<Inner<T, E>>) -> Self {
        Self { target }
    }

    /// Returns the id of the eventual this capability settles.
    #[must_use]
    pub fn id(&self) -> EventualId {
        self.target.id
    }
}

impl<T, E> Settle<T, E>
where
    T: Clone + 'static,
    E: Clone + From<Panicked> + 'static,
{
    /// Fulfills the target with `value`.
    pub fn fulfill(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the target with `reason`.
    pub fn reject(&self, reason: E) -> bool {
        self.settle(Err(reason))
    }

    /// Settles the target with an outcome.
    ///
    /// Returns false if the target already settled or adopted another
    /// eventual.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        if self.target.is_resolved() {
            trace!(eventual = %self.target.id, "settlement refused");
            return false;
        }
        self.target.settle(outcome)
    }

    /// Fulfills with an immediate value or adopts a deferred one.
    pub fn resolve(&self, resolution: Resolution<T, E>) -> bool {
        match resolution {
            Resolution::Immediate(value) => self.fulfill(value),
            Resolution::Deferred(source) => self.adopt(&source),
        }
    }

    /// Makes the target follow `source`: it settles the way `source` does.
    ///
    /// The target stays pending until then, but counts as resolved: every
    /// later `fulfill`, `reject`, `resolve` or `adopt` through any clone of
    /// this capability returns false. An eventual cannot adopt itself; that
    /// call returns false and leaves the capability usable.
    pub fn adopt(&self, source: &Eventual<T, E>) -> bool {
        if Rc::ptr_eq(&self.target, &source.inner) {
            warn!(eventual = %self.target.id, "eventual cannot adopt itself");
            return false;
        }
        if !self.target.follow() {
            return false;
        }
        trace!(eventual = %self.target.id, source = %source.id(), "adopting");
        let follower = Rc::clone(&self.target);
        source.subscribe(Box::new(move |outcome| {
            follower.settle(outcome);
        }));
        true
    }

    /// Applies a reaction's result to the target.
    pub(crate) fn apply(&self, handled: Handled<T, E>) {
        match handled {
            Ok(resolution) => {
                self.resolve(resolution);
            }
            Err(reason) => {
                self.reject(reason);
            }
        }
    }

    /// Returns true once the target has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.target.is_settled()
    }

    /// Returns true once the target has settled or adopted another eventual.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.target.is_resolved()
    }
}

impl<T, E> Clone for Settle<T, E> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
        }
    }
}

impl<T, E> fmt::Debug for Settle<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settle")
            .field("target", &self.target.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reason;
    use crate::runtime::EventLoop;
    use crate::types::Status;

    #[test]
    fn adoption_follows_rejection() {
        let event_loop = EventLoop::new();
        let dispatcher = event_loop.dispatcher();
        let source = Eventual::<u8>::rejected(&dispatcher, Reason::msg("inner"));
        let (target, settle) = Eventual::<u8>::pending(&dispatcher);

        settle.adopt(&source);
        assert!(target.is_pending());
        assert!(!settle.is_settled());

        event_loop.run_until_idle().expect("run");
        assert_eq!(target.outcome(), Some(Err(Reason::msg("inner"))));
    }

    #[test]
    fn adoption_locks_out_later_settlements() {
        let event_loop = EventLoop::new();
        let dispatcher = event_loop.dispatcher();
        let (source, settle_source) = Eventual::<u8>::pending(&dispatcher);
        let (target, settle) = Eventual::<u8>::pending(&dispatcher);

        assert!(settle.resolve(Resolution::Deferred(source)));
        assert!(settle.is_resolved());
        assert!(!settle.is_settled());

        let other = settle.clone();
        assert!(!settle.reject(Reason::msg("late")));
        assert!(!other.fulfill(1));
        assert!(!settle.resolve(Resolution::Immediate(2)));
        let (second, _) = Eventual::<u8>::pending(&dispatcher);
        assert!(!settle.adopt(&second));
        assert!(target.is_pending());

        settle_source.fulfill(5);
        event_loop.run_until_idle().expect("run");
        assert_eq!(target.outcome(), Some(Ok(5)));
        assert!(settle.is_settled());
    }

    #[test]
    fn adopting_after_settlement_is_refused() {
        let event_loop = EventLoop::new();
        let dispatcher = event_loop.dispatcher();
        let (target, settle) = Eventual::<u8>::pending(&dispatcher);
        let source = Eventual::<u8>::fulfilled(&dispatcher, 9);

        assert!(settle.fulfill(1));
        assert!(!settle.adopt(&source));
        assert_eq!(event_loop.pending(), 0);
        event_loop.run_until_idle().expect("run");
        assert_eq!(target.outcome(), Some(Ok(1)));
    }

    #[test]
    fn self_adoption_is_refused() {
        let event_loop = EventLoop::new();
        let dispatcher = event_loop.dispatcher();
        let (target, settle) = Eventual::<u8>::pending(&dispatcher);

        assert!(!settle.adopt(&target));
        assert!(!settle.is_resolved());
        assert_eq!(target.reaction_count(), 0);

        assert!(settle.fulfill(4));
        event_loop.run_until_idle().expect("run");
        assert_eq!(target.status(), Status::Fulfilled);
        assert_eq!(target.outcome(), Some(Ok(4)));
    }

    #[test]
    fn clones_settle_the_same_target() {
        let event_loop = EventLoop::new();
        let (target, settle) = Eventual::<u8>::pending(&event_loop.dispatcher());
        let other = settle.clone();
        assert_eq!(other.id(), target.id());
        assert!(other.fulfill(3));
        assert!(settle.is_settled());
        assert!(!settle.fulfill(4));
        assert_eq!(target.outcome(), Some(Ok(3)));
    }
}
