//! Per-scope session lifecycle.

use std::fmt;

use thiserror::Error;

/// Lifecycle of a single scoped session.
///
/// ```text
/// Unopened ──connect ok──► Open ──scope exit──► Closed
/// ```
///
/// A failed connect leaves the scope at `Unopened` with no handle. There is
/// no way back from `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No handle has been produced yet.
    #[default]
    Unopened,
    /// A handle is live and owned by the scope.
    Open,
    /// The handle was handed to the disconnector.
    Closed,
}

impl SessionState {
    /// Returns true while a handle is live.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if the scope has finished its single open/close cycle.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Check whether a transition to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!((self, next), (Self::Unopened, Self::Open) | (Self::Open, Self::Closed))
    }

    /// Move to `next`, rejecting anything but `Unopened -> Open -> Closed`.
    pub fn transition(&mut self, next: Self) -> Result<(), StateTransitionError> {
        if !self.can_transition_to(next) {
            return Err(StateTransitionError {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unopened => "unopened",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid session transition: {from} -> {to}")]
pub struct StateTransitionError {
    /// State before the attempted transition.
    pub from: SessionState,
    /// Requested state.
    pub to: SessionState,
}
