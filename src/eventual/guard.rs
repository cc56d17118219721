//! Guarded calls.
//!
//! Initiators and reactions are user code. A guarded call runs one of them
//! and turns every way it can fail into an `Err` reason: an explicit `Err`
//! passes through, and a panic is captured as [`Panicked`] and converted
//! with `E::from`. Nothing escapes to the caller of `then` or to the
//! scheduler's run loop.

use std::panic::{self, AssertUnwindSafe};

use crate::tracing_compat::warn;
use crate::types::Panicked;

/// Runs `f`, converting a panic into a rejection reason.
pub fn call<R, E, F>(f: F) -> Result<R, E>
where
    F: FnOnce() -> Result<R, E>,
    E: From<Panicked>,
{
    // No eventual state is borrowed while user code runs, so observing it
    // after an unwind is sound.
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let panicked = Panicked::from_payload(payload.as_ref());
            warn!(panic = %panicked, "guarded call panicked");
            Err(E::from(panicked))
        }
    }
}
