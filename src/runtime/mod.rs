//! Deferred dispatch: the scheduler seam and the bundled event loop.
//!
//! - [`Task`]: a type-erased callback waiting to run
//! - [`Schedule`]: the one operation a host must provide, `enqueue(task)`
//! - [`Dispatcher`]: the shared scheduler handle every eventual carries
//! - [`EventLoop`]: a deterministic macrotask/microtask loop

pub mod dispatcher;
pub mod event_loop;
pub mod task;

pub use dispatcher::{Dispatcher, Schedule};
pub use event_loop::{DispatchRecord, EventLoop, Lane, LoopStats, RunReport};
pub use task::{LATE_REACTION, SETTLE_BATCH, Task};
