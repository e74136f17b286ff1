//! Shell introspection adapters.
//!
//! A Jupyter kernel exports `JPY_PARENT_PID` / `JPY_SESSION_NAME` to the
//! process it runs in. `IB_SHELL` overrides detection with an explicit
//! shell class name.

use std::env::VarError;

use crate::application::ports::{IntrospectionError, ShellIntrospectionPort};
use crate::domain::shell::{NOTEBOOK_SHELL, ShellIdentity};

/// Explicit shell class override.
pub const ENV_SHELL: &str = "IB_SHELL";

/// Variables set by a Jupyter kernel launcher.
pub const JUPYTER_MARKERS: [&str; 2] = ["JPY_PARENT_PID", "JPY_SESSION_NAME"];

type Lookup = Box<dyn Fn(&str) -> Result<String, VarError> + Send + Sync>;

/// Reads the active shell from environment variables.
pub struct EnvShellIntrospector {
    lookup: Lookup,
}

impl EnvShellIntrospector {
    /// Introspect the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_lookup(|key| std::env::var(key))
    }

    /// Introspect through an arbitrary variable lookup.
    #[must_use]
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn var(&self, key: &str) -> Result<Option<String>, IntrospectionError> {
        match (self.lookup)(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(IntrospectionError::Lookup(format!(
                "{key} is not valid unicode"
            ))),
        }
    }
}

impl Default for EnvShellIntrospector {
    fn default() -> Self {
        Self::from_env()
    }
}

impl std::fmt::Debug for EnvShellIntrospector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvShellIntrospector").finish_non_exhaustive()
    }
}

impl ShellIntrospectionPort for EnvShellIntrospector {
    fn current_shell(&self) -> Result<Option<ShellIdentity>, IntrospectionError> {
        if let Some(name) = self.var(ENV_SHELL)? {
            let name = name.trim();
            if !name.is_empty() {
                return Ok(Some(ShellIdentity::new(name)));
            }
        }

        for marker in JUPYTER_MARKERS {
            if self.var(marker)?.is_some() {
                return Ok(Some(ShellIdentity::new(NOTEBOOK_SHELL)));
            }
        }

        Ok(None)
    }
}

/// A process with no shell introspection machinery at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShell;

impl ShellIntrospectionPort for NoShell {
    fn current_shell(&self) -> Result<Option<ShellIdentity>, IntrospectionError> {
        Err(IntrospectionError::Unavailable)
    }
}
