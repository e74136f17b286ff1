//! Execution context detection.

use tracing::debug;

use crate::application::ports::ShellIntrospectionPort;
use crate::domain::shell::ExecutionContext;

/// Classify the current execution context.
///
/// Introspection failures never escape: a missing or broken shell lookup
/// classifies as [`ExecutionContext::Script`].
pub fn detect_context<S>(shell: &S) -> ExecutionContext
where
    S: ShellIntrospectionPort + ?Sized,
{
    match shell.current_shell() {
        Ok(Some(identity)) => ExecutionContext::from_shell(&identity),
        Ok(None) => ExecutionContext::Script,
        Err(err) => {
            debug!(error = %err, "Shell introspection failed, assuming script context");
            ExecutionContext::Script
        }
    }
}

/// Returns true only when running inside a notebook kernel.
pub fn is_notebook<S>(shell: &S) -> bool
where
    S: ShellIntrospectionPort + ?Sized,
{
    detect_context(shell).is_notebook()
}
