//! Chaining: deriving new eventuals from reactions to an existing one.
//!
//! Every operator here returns a fresh eventual whose outcome is whatever the
//! selected reaction produced:
//!
//! - `Ok(Resolution::Immediate(v))` fulfills the derived eventual with `v`.
//! - `Ok(Resolution::Deferred(e))` makes it adopt `e`.
//! - `Err(reason)`, or a panic inside the reaction, rejects it.
//!
//! A missing fulfillment half passes the value through unchanged and a
//! missing rejection half passes the reason through unchanged, so a
//! rejection travels down a chain until some `catch` handles it.

use super::{Eventual, Handled, Resolution, guard};
use crate::tracing_compat::trace;
use crate::types::Panicked;

impl<T, E> Eventual<T, E>
where
    T: Clone + 'static,
    E: Clone + From<Panicked> + 'static,
{
    /// Reacts to either outcome.
    ///
    /// Exactly one of the two reactions runs, once, on the dispatcher, after
    /// this call has returned.
    pub fn then_with<U, F, R>(&self, on_fulfilled: F, on_rejected: R) -> Eventual<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Handled<U, E> + 'static,
        R: FnOnce(E) -> Handled<U, E> + 'static,
    {
        let (derived, settle) = Eventual::pending(self.dispatcher());
        trace!(source = %self.id(), derived = %derived.id(), "reaction attached");
        self.subscribe(Box::new(move |outcome| {
            let handled = match outcome {
                Ok(value) => guard::call(move || on_fulfilled(value)),
                Err(reason) => guard::call(move || on_rejected(reason)),
            };
            settle.apply(handled);
        }));
        derived
    }

    /// Reacts to fulfillment; a rejection passes through.
    pub fn then<U, F>(&self, on_fulfilled: F) -> Eventual<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Handled<U, E> + 'static,
    {
        self.then_with(on_fulfilled, Err)
    }

    /// Reacts to rejection; a value passes through.
    pub fn catch<R>(&self, on_rejected: R) -> Self
    where
        R: FnOnce(E) -> Handled<T, E> + 'static,
    {
        self.then_with(|value| Ok(Resolution::Immediate(value)), on_rejected)
    }

    /// Derives an eventual that settles exactly like this one.
    #[must_use]
    pub fn forward(&self) -> Self {
        self.then_with(|value| Ok(Resolution::Immediate(value)), Err)
    }

    /// Transforms the value.
    pub fn map<U, F>(&self, f: F) -> Eventual<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> U + 'static,
    {
        self.then(move |value| Ok(Resolution::Immediate(f(value))))
    }

    /// Transforms the rejection reason.
    pub fn map_err<F>(&self, f: F) -> Self
    where
        F: FnOnce(E) -> E + 'static,
    {
        self.catch(move |reason| Err(f(reason)))
    }

    /// Continues with another eventual produced from the value.
    pub fn and_then<U, F>(&self, f: F) -> Eventual<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Eventual<U, E> + 'static,
    {
        self.then(move |value| Ok(Resolution::Deferred(f(value))))
    }
}
