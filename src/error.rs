//! Error types for the event loop and its configuration.
//!
//! Failures of eventuals themselves are rejections carried by the eventual,
//! never values of [`Error`]. This type only covers the host-facing surface:
//! running the loop and building its configuration.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the runtime surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `run_until_idle` hit the configured step budget with work remaining.
    #[error("step budget of {budget} tasks exhausted with {remaining} tasks still queued")]
    StepBudgetExhausted {
        /// The configured budget.
        budget: u64,
        /// Tasks left in both lanes when the run stopped.
        remaining: usize,
    },
    /// The loop configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns true if the run stopped because of the step budget.
    #[must_use]
    pub const fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::StepBudgetExhausted { .. })
    }
}

/// Result alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
