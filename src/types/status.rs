//! Settlement status of an eventual.

use core::fmt;

/// Where an eventual is in its lifecycle.
///
/// The only transitions are `Pending -> Fulfilled` and `Pending -> Rejected`.
/// Both terminal states are final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// No outcome yet; reactions are queued.
    #[default]
    Pending,
    /// Settled with a value.
    Fulfilled,
    /// Settled with a rejection reason.
    Rejected,
}

impl Status {
    /// Returns the status matching a settled outcome.
    #[must_use]
    pub const fn of<T, E>(outcome: &Result<T, E>) -> Self {
        match outcome {
            Ok(_) => Self::Fulfilled,
            Err(_) => Self::Rejected,
        }
    }

    /// Returns true once the eventual has left `Pending`.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the status name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
