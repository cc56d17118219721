//! Rejection reasons.
//!
//! A rejection carries an arbitrary reason. [`Reason`] is the default reason
//! type: a short message, a captured panic, or any opaque `'static` value.
//! Custom reason types work too, as long as they can absorb a [`Panicked`]
//! so that a panicking initiator or reaction still becomes a rejection.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// A panic captured inside a guarded call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Panicked {
    message: String,
}

impl Panicked {
    /// Creates a captured panic with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts a message from a `catch_unwind` payload.
    #[must_use]
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self { message }
    }

    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The default rejection reason.
///
/// # Example
///
/// ```
/// use eventual::Reason;
///
/// let reason = Reason::msg("boom");
/// assert_eq!(reason.to_string(), "boom");
///
/// let opaque = Reason::opaque(42_u32);
/// assert_eq!(opaque.downcast_ref::<u32>(), Some(&42));
/// ```
#[derive(Clone, Error)]
pub enum Reason {
    /// A human-readable failure message.
    #[error("{0}")]
    Message(Cow<'static, str>),
    /// A panic raised by an initiator or a reaction.
    #[error("panicked: {0}")]
    Panicked(Panicked),
    /// An arbitrary value supplied by the rejecting code.
    #[error("opaque rejection")]
    Opaque(Rc<dyn Any>),
}

impl Reason {
    /// Creates a message reason.
    #[must_use]
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Message(message.into())
    }

    /// Wraps an arbitrary value as the reason.
    #[must_use]
    pub fn opaque<V: Any>(value: V) -> Self {
        Self::Opaque(Rc::new(value))
    }

    /// Returns the message for `Message` reasons.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }

    /// Returns true if the reason came from a captured panic.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Downcasts an opaque reason to a concrete type.
    #[must_use]
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        match self {
            Self::Opaque(value) => value.downcast_ref::<V>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.debug_tuple("Message").field(msg).finish(),
            Self::Panicked(p) => f.debug_tuple("Panicked").field(p).finish(),
            Self::Opaque(_) => f.debug_tuple("Opaque").finish_non_exhaustive(),
        }
    }
}

impl PartialEq for Reason {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Message(a), Self::Message(b)) => a == b,
            (Self::Panicked(a), Self::Panicked(b)) => a == b,
            // Opaque values are compared by identity.
            (Self::Opaque(a), Self::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Panicked> for Reason {
    fn from(panicked: Panicked) -> Self {
        Self::Panicked(panicked)
    }
}

impl From<&'static str> for Reason {
    fn from(message: &'static str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for Reason {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}
