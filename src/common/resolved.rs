//! Values that may have fallen back to a default

use serde::{Deserialize, Serialize};

/// A derived value together with how it was obtained
///
/// `Degraded` carries the default that was substituted and the reason the
/// real value could not be produced, so callers can tell a genuine zero
/// dividend apart from an unreachable dividend provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Resolved<T> {
    /// Value computed from provider data
    Ok { value: T },
    /// Default substituted after a provider failure
    Degraded { value: T, reason: String },
}

impl<T> Resolved<T> {
    pub fn ok(value: T) -> Self {
        Resolved::Ok { value }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Resolved::Degraded {
            value,
            reason: reason.into(),
        }
    }

    /// The value, whichever way it was obtained
    pub fn value(&self) -> &T {
        match self {
            Resolved::Ok { value } | Resolved::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Resolved::Degraded { .. })
    }

    /// Why the default was used, if it was
    pub fn reason(&self) -> Option<&str> {
        match self {
            Resolved::Ok { .. } => None,
            Resolved::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolved<U> {
        match self {
            Resolved::Ok { value } => Resolved::Ok { value: f(value) },
            Resolved::Degraded { value, reason } => Resolved::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}

impl<T: Copy> Resolved<T> {
    pub fn get(&self) -> T {
        *self.value()
    }
}
