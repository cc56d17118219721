//! Core types shared by the eventual state machine and the runtime.
//!
//! - [`id`]: Identifier types (`EventualId`, `TaskId`)
//! - [`reason`]: Rejection reasons and captured panics
//! - [`status`]: The three-state settlement status

pub mod id;
pub mod reason;
pub mod status;

pub use id::{EventualId, TaskId};
pub use reason::{Panicked, Reason};
pub use status::Status;
