//! Tracing shim.
//!
//! With the `tracing-integration` feature this re-exports the `tracing`
//! event macros. Without it the same names expand to nothing, so call sites
//! never need their own `cfg` gates.

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __eventual_tracing_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing-integration"))]
pub use crate::__eventual_tracing_noop as debug;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__eventual_tracing_noop as error;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__eventual_tracing_noop as info;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__eventual_tracing_noop as trace;
#[cfg(not(feature = "tracing-integration"))]
pub use crate::__eventual_tracing_noop as warn;
