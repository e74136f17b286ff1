//! Shell Introspection Port (Driven Port)

use thiserror::Error;

use crate::domain::shell::ShellIdentity;

/// Failure to query the active interactive shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    /// No shell introspection machinery exists in this process.
    #[error("shell introspection unavailable")]
    Unavailable,

    /// The machinery exists but the shell could not be looked up.
    #[error("shell lookup failed: {0}")]
    Lookup(String),
}

/// Reports the identity of the active interactive shell.
pub trait ShellIntrospectionPort {
    /// `Ok(None)` means no interactive shell is active.
    fn current_shell(&self) -> Result<Option<ShellIdentity>, IntrospectionError>;
}
