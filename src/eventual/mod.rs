//! The eventual: a write-once outcome with queued reactions.
//!
//! An [`Eventual`] starts `Pending` and settles at most once, either
//! `Fulfilled` with a value or `Rejected` with a reason. Reactions attached
//! while pending wait in an ordered list; the settlement swaps that list
//! out and hands it to the dispatcher as a single task, so the whole batch
//! runs in registration order after the settling call has returned.
//! Reactions attached after settlement are dispatched one task each.
//! No reaction ever runs inside the call that attached it.
//!
//! # Flattening
//!
//! Anything that settles an eventual (a [`Settle`] capability or a
//! reaction's return value) may hand over a [`Resolution::Deferred`]
//! instead of a value. The receiving eventual then adopts the inner one's
//! eventual outcome, so an eventual never carries another eventual as its
//! value. Rejection reasons are never flattened.
//!
//! # Example
//!
//! ```
//! use eventual::{Eventual, Reason, Resolution, runtime::EventLoop};
//!
//! let event_loop = EventLoop::new();
//! let dispatcher = event_loop.dispatcher();
//!
//! let (source, settle) = Eventual::<u32, Reason>::pending(&dispatcher);
//! let next = source.then(|v| Ok(Resolution::Immediate(v + 1)));
//!
//! settle.fulfill(5);
//! assert!(next.is_pending());
//!
//! event_loop.run_until_idle().expect("run");
//! assert_eq!(next.outcome(), Some(Ok(6)));
//! ```

pub mod chain;
pub mod guard;
mod settle;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

pub use settle::Settle;

use crate::runtime::{Dispatcher, LATE_REACTION, SETTLE_BATCH};
use crate::tracing_compat::trace;
use crate::types::{EventualId, Panicked, Reason, Status};

/// A queued reaction: receives the outcome once the eventual settles.
pub(crate) type Reaction<T, E> = Box<dyn FnOnce(Result<T, E>)>;

/// A value or an eventual that will produce one.
pub enum Resolution<T, E = Reason> {
    /// Settle with this value now.
    Immediate(T),
    /// Adopt this eventual's outcome when it settles.
    Deferred(Eventual<T, E>),
}

impl<T, E> From<Eventual<T, E>> for Resolution<T, E> {
    fn from(eventual: Eventual<T, E>) -> Self {
        Self::Deferred(eventual)
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Resolution<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Self::Deferred(eventual) => f.debug_tuple("Deferred").field(&eventual.id()).finish(),
        }
    }
}

/// What a reaction returns: a resolution, or a reason to reject with.
pub type Handled<T, E = Reason> = Result<Resolution<T, E>, E>;

struct State<T, E> {
    status: Status,
    /// Set once the eventual committed to adopting another one. Only the
    /// adoption may settle it from then on.
    following: bool,
    outcome: Option<Result<T, E>>,
    reactions: SmallVec<[Reaction<T, E>; 1]>,
}

pub(crate) struct Inner<T, E> {
    id: EventualId,
    dispatcher: Dispatcher,
    state: RefCell<State<T, E>>,
}

impl<T, E> Inner<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Performs the `Pending -> settled` transition.
    ///
    /// Returns false, changing nothing, if the eventual already settled.
    pub(crate) fn settle(&self, outcome: Result<T, E>) -> bool {
        let status = Status::of(&outcome);
        let reactions = {
            let mut state = self.state.borrow_mut();
            if state.status.is_settled() {
                trace!(eventual = %self.id, attempted = %status, "settlement ignored");
                return false;
            }
            state.status = status;
            state.outcome = Some(outcome.clone());
            std::mem::take(&mut state.reactions)
        };
        trace!(
            eventual = %self.id,
            %status,
            reactions = reactions.len(),
            "eventual settled"
        );
        if !reactions.is_empty() {
            self.dispatcher.defer(SETTLE_BATCH, move || {
                for reaction in reactions {
                    reaction(outcome.clone());
                }
            });
        }
        true
    }

    fn is_settled(&self) -> bool {
        self.state.borrow().status.is_settled()
    }

    /// Settled, or waiting on an adopted eventual.
    fn is_resolved(&self) -> bool {
        let state = self.state.borrow();
        state.following || state.status.is_settled()
    }

    /// Commits to an adoption. Returns false if already resolved.
    fn follow(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.following || state.status.is_settled() {
            return false;
        }
        state.following = true;
        true
    }
}

/// A single eventual outcome, shared by every clone of the handle.
pub struct Eventual<T, E = Reason> {
    inner: Rc<Inner<T, E>>,
}

impl<T, E> Eventual<T, E> {
    /// Returns the eventual's id.
    #[must_use]
    pub fn id(&self) -> EventualId {
        self.inner.id
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.inner.state.borrow().status
    }

    /// Returns true while no outcome is known.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status() == Status::Pending
    }

    /// Returns the number of reactions waiting for settlement.
    #[must_use]
    pub fn reaction_count(&self) -> usize {
        self.inner.state.borrow().reactions.len()
    }

    /// Returns the dispatcher this eventual and its derivatives use.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Returns true if both handles refer to the same eventual.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn unsettled(dispatcher: &Dispatcher) -> Self {
        let id = EventualId::next();
        trace!(eventual = %id, "eventual created");
        Self {
            inner: Rc::new(Inner {
                id,
                dispatcher: dispatcher.clone(),
                state: RefCell::new(State {
                    status: Status::Pending,
                    following: false,
                    outcome: None,
                    reactions: SmallVec::new(),
                }),
            }),
        }
    }
}

impl<T: Clone, E: Clone> Eventual<T, E> {
    /// Returns a copy of the outcome, or `None` while pending.
    #[must_use]
    pub fn outcome(&self) -> Option<Result<T, E>> {
        self.inner.state.borrow().outcome.clone()
    }
}

impl<T, E> Eventual<T, E>
where
    T: Clone + 'static,
    E: Clone + From<Panicked> + 'static,
{
    /// Creates an eventual and runs `initiator` before returning.
    ///
    /// The initiator receives the settlement capability and may use it
    /// immediately or keep it for later. If it returns `Err` or panics, the
    /// eventual is rejected with that reason, unless it already settled or
    /// adopted another eventual.
    pub fn new<F>(dispatcher: &Dispatcher, initiator: F) -> Self
    where
        F: FnOnce(Settle<T, E>) -> Result<(), E>,
    {
        let eventual = Self::unsettled(dispatcher);
        let settle = Settle::new(Rc::clone(&eventual.inner));
        let handed = settle.clone();
        if let Err(reason) = guard::call(move || initiator(handed)) {
            settle.reject(reason);
        }
        eventual
    }

    /// Creates a pending eventual together with its settlement capability.
    #[must_use]
    pub fn pending(dispatcher: &Dispatcher) -> (Self, Settle<T, E>) {
        let eventual = Self::unsettled(dispatcher);
        let settle = Settle::new(Rc::clone(&eventual.inner));
        (eventual, settle)
    }

    /// Creates an eventual from a resolution.
    ///
    /// An immediate value fulfills at once; a deferred eventual is adopted.
    #[must_use]
    pub fn resolve(dispatcher: &Dispatcher, resolution: Resolution<T, E>) -> Self {
        let (eventual, settle) = Self::pending(dispatcher);
        settle.resolve(resolution);
        eventual
    }

    /// Creates an eventual already fulfilled with `value`.
    #[must_use]
    pub fn fulfilled(dispatcher: &Dispatcher, value: T) -> Self {
        Self::resolve(dispatcher, Resolution::Immediate(value))
    }

    /// Creates an eventual already rejected with `reason`.
    #[must_use]
    pub fn rejected(dispatcher: &Dispatcher, reason: E) -> Self {
        let (eventual, settle) = Self::pending(dispatcher);
        settle.reject(reason);
        eventual
    }

    /// Fulfills with every input's value, in input order, or rejects with
    /// the first rejection. See [`combinator::all`](crate::combinator::all).
    pub fn all<I>(dispatcher: &Dispatcher, eventuals: I) -> Eventual<Vec<T>, E>
    where
        I: IntoIterator<Item = Self>,
    {
        crate::combinator::all(dispatcher, eventuals)
    }

    /// Settles like the first input to settle.
    /// See [`combinator::race`](crate::combinator::race).
    pub fn race<I>(dispatcher: &Dispatcher, eventuals: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        crate::combinator::race(dispatcher, eventuals)
    }

    /// Attaches a raw reaction.
    ///
    /// Pending: the reaction joins the queue drained at settlement.
    /// Settled: the reaction is dispatched as its own task with a copy of
    /// the known outcome.
    pub(crate) fn subscribe(&self, reaction: Reaction<T, E>) {
        let known = self.inner.state.borrow().outcome.clone();
        match known {
            None => self.inner.state.borrow_mut().reactions.push(reaction),
            Some(outcome) => {
                trace!(eventual = %self.inner.id, "late reaction dispatched");
                self.inner
                    .dispatcher
                    .defer(LATE_REACTION, move || reaction(outcome));
            }
        }
    }
}

impl<T, E> Clone for Eventual<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for Eventual<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eventual")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("reactions", &self.reaction_count())
            .finish()
    }
}
