//! Combinators over several eventuals.
//!
//! - [`all`](mod@all): wait for every input, fail on the first rejection
//! - [`race`](mod@race): the first input to settle decides
//!
//! Both observe their inputs through ordinary reactions, so their results
//! are delivered on the dispatcher like any other reaction.

pub mod all;
pub mod race;

pub use all::all;
pub use race::race;
