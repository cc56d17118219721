//! Eventual: single-threaded deferred values with chaining and flattening.
//!
//! # Overview
//!
//! An [`Eventual`] stands for an outcome that is not known yet. It settles
//! exactly once, fulfilled with a value or rejected with a reason, and every
//! reaction attached to it runs once on a pluggable scheduler after the call
//! that attached it has returned.
//!
//! # Core Guarantees
//!
//! - **Write-once**: the first settlement wins; later attempts are ignored
//! - **Deferred delivery**: reactions never run inside the attaching call
//! - **Ordered delivery**: reactions on one eventual run in registration order
//! - **Flattening**: an eventual never carries another eventual as its value
//! - **Contained failures**: an `Err` or panic from user code becomes a rejection
//!
//! # Module Structure
//!
//! - [`eventual`]: the eventual, its settlement capability, and chaining
//! - [`combinator`]: `all` and `race` over several eventuals
//! - [`runtime`]: the scheduler seam and a macrotask/microtask event loop
//! - [`types`]: identifiers, status, and rejection reasons
//! - [`config`]: event loop configuration
//! - [`error`](mod@error): errors reported by the event loop
//! - [`tracing_compat`]: optional tracing integration (requires `tracing-integration` feature)
//!
//! # Example
//!
//! ```
//! use eventual::{Eventual, Reason, runtime::EventLoop};
//!
//! let event_loop = EventLoop::new();
//! let dispatcher = event_loop.dispatcher();
//!
//! let answer = Eventual::<u32>::fulfilled(&dispatcher, 5)
//!     .map(|v| v + 1)
//!     .catch(|_: Reason| unreachable!());
//!
//! event_loop.run_until_idle().expect("run");
//! assert_eq!(answer.outcome(), Some(Ok(6)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_inception)]
#![allow(clippy::doc_markdown)]

pub mod combinator;
pub mod config;
pub mod error;
pub mod eventual;
pub mod runtime;
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;
pub mod tracing_compat;
pub mod types;

pub use config::{ConfigError, DispatchMode, LoopConfig};
pub use error::{Error, Result};
pub use eventual::{Eventual, Handled, Resolution, Settle};
pub use runtime::{Dispatcher, EventLoop, Schedule, Task};
pub use types::{EventualId, Panicked, Reason, Status, TaskId};
