//! All combinator: wait for every input, fail on the first rejection.
//!
//! ```text
//! all([e1, e2, ..., en]):
//!   slots ← [None; n]
//!   on ei fulfilled with v: slots[i] ← v; if every slot is filled, fulfill(slots)
//!   on ei rejected with r:  reject(r)      // first rejection wins
//! ```
//!
//! # Edge Cases
//!
//! - `all([])` fulfills at once with an empty vector.
//! - Inputs that settle after the result rejected are observed and ignored.
//! - Values keep input order, not settlement order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Eventual;
use crate::runtime::Dispatcher;
use crate::tracing_compat::trace;
use crate::types::Panicked;

struct Collector<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
}

impl<T> Collector<T> {
    fn new(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self {
            slots,
            remaining: len,
        }
    }

    /// Stores a value; returns every value once the last slot is filled.
    fn fill(&mut self, index: usize, value: T) -> Option<Vec<T>> {
        if self.slots[index].replace(value).is_none() {
            self.remaining -= 1;
        }
        if self.remaining > 0 {
            return None;
        }
        Some(self.slots.iter_mut().filter_map(Option::take).collect())
    }
}

/// Fulfills with every input's value, in input order, once all fulfilled;
/// rejects with the first rejection observed.
pub fn all<T, E, I>(dispatcher: &Dispatcher, eventuals: I) -> Eventual<Vec<T>, E>
where
    T: Clone + 'static,
    E: Clone + From<Panicked> + 'static,
    I: IntoIterator<Item = Eventual<T, E>>,
{
    let inputs: Vec<_> = eventuals.into_iter().collect();
    let (result, settle) = Eventual::pending(dispatcher);
    trace!(eventual = %result.id(), inputs = inputs.len(), "all");
    if inputs.is_empty() {
        settle.fulfill(Vec::new());
        return result;
    }

    let collector = Rc::new(RefCell::new(Collector::new(inputs.len())));
    for (index, input) in inputs.iter().enumerate() {
        let collector = Rc::clone(&collector);
        let settle = settle.clone();
        input.subscribe(Box::new(move |outcome| match outcome {
            Ok(value) => {
                let done = collector.borrow_mut().fill(index, value);
                if let Some(values) = done {
                    settle.fulfill(values);
                }
            }
            Err(reason) => {
                settle.reject(reason);
            }
        }));
    }
    result
}
