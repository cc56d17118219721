//! Race combinator: the first input to settle decides the outcome.
//!
//! "First" means first in dispatch order. Inputs that are already settled
//! when the race starts are observed in input order, so
//! `race([fulfilled(1), fulfilled(2)])` fulfills with `1`.
//!
//! `race([])` never settles.

use crate::Eventual;
use crate::runtime::Dispatcher;
use crate::tracing_compat::trace;
use crate::types::Panicked;

/// Settles with the outcome of whichever input settles first.
pub fn race<T, E, I>(dispatcher: &Dispatcher, eventuals: I) -> Eventual<T, E>
where
    T: Clone + 'static,
    E: Clone + From<Panicked> + 'static,
    I: IntoIterator<Item = Eventual<T, E>>,
{
    let (result, settle) = Eventual::pending(dispatcher);
    trace!(eventual = %result.id(), "race");
    for input in eventuals {
        let settle = settle.clone();
        input.subscribe(Box::new(move |outcome| {
            settle.settle(outcome);
        }));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reason;
    use crate::runtime::EventLoop;

    #[test]
    fn first_settlement_wins() {
        let event_loop = EventLoop::new();
        let dispatcher = event_loop.dispatcher();
        let (slow, settle_slow) = Eventual::<u8>::pending(&dispatcher);
        let (fast, settle_fast) = Eventual::<u8>::pending(&dispatcher);

        let winner = race(&dispatcher, [slow, fast]);
        settle_fast.reject(Reason::msg("fast"));
        settle_slow.fulfill(1);
        event_loop.run_until_idle().expect("run");

        assert_eq!(winner.outcome(), Some(Err(Reason::msg("fast"))));
    }

    #[test]
    fn already_settled_inputs_win_in_input_order() {
        let event_loop = EventLoop::new();
        let dispatcher = event_loop.dispatcher();
        let inputs = [
            Eventual::<u8>::fulfilled(&dispatcher, 1),
            Eventual::<u8>::fulfilled(&dispatcher, 2),
        ];
        let winner = race(&dispatcher, inputs);
        event_loop.run_until_idle().expect("run");
        assert_eq!(winner.outcome(), Some(Ok(1)));
    }

    #[test]
    fn empty_race_stays_pending() {
        let event_loop = EventLoop::new();
        let winner = race::<u8, Reason, _>(&event_loop.dispatcher(), []);
        event_loop.run_until_idle().expect("run");
        assert!(winner.is_pending());
    }
}
