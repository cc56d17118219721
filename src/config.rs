//! Event loop configuration.
//!
//! [`LoopConfig`] selects the lane that eventual reactions are dispatched to
//! and bounds how much work a single run may do. Configurations can be built
//! in code or, with the `config-file` feature, loaded from TOML:
//!
//! ```toml
//! dispatch = "microtask"
//! max_steps = 10000
//! trace_capacity = 256
//! ```

use core::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Upper bound on the dispatch trace ring.
pub const MAX_TRACE_CAPACITY: usize = 1 << 20;

/// Which queue receives settlement batches and late reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Timer-like granularity: reactions wait behind every macrotask that
    /// was queued before them.
    #[default]
    Macrotask,
    /// Same-turn granularity: reactions run before the next macrotask.
    Microtask,
}

impl DispatchMode {
    /// Returns the mode name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Macrotask => "macrotask",
            Self::Microtask => "microtask",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A step budget of zero would refuse every run.
    #[error("max_steps must be greater than zero")]
    ZeroStepBudget,
    /// The trace ring would be unreasonably large.
    #[error("trace_capacity {requested} exceeds the maximum of {max}")]
    TraceCapacityTooLarge {
        /// The requested capacity.
        requested: usize,
        /// The maximum accepted capacity.
        max: usize,
    },
    /// The TOML source could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Configuration for an [`EventLoop`](crate::runtime::EventLoop).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    /// Lane used for eventual reactions.
    pub dispatch: DispatchMode,
    /// Maximum tasks one `run_until_idle` call may execute. `None` is unbounded.
    pub max_steps: Option<u64>,
    /// Number of dispatch records kept for inspection. Zero disables tracing.
    pub trace_capacity: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchMode::Macrotask,
            max_steps: None,
            trace_capacity: 0,
        }
    }
}

impl LoopConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dispatch lane.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Sets the per-run step budget.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Sets the dispatch trace capacity.
    #[must_use]
    pub fn with_trace_capacity(mut self, capacity: usize) -> Self {
        self.trace_capacity = capacity;
        self
    }

    /// Checks the configuration for values the loop cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::ZeroStepBudget);
        }
        if self.trace_capacity > MAX_TRACE_CAPACITY {
            return Err(ConfigError::TraceCapacityTooLarge {
                requested: self.trace_capacity,
                max: MAX_TRACE_CAPACITY,
            });
        }
        Ok(())
    }

    /// Parses and validates a TOML configuration.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
