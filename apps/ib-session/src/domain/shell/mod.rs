//! Execution context of the calling code.
//!
//! Notebook kernels already drive a cooperative event loop, so connecting
//! from inside one needs an integration step first. Everything else (plain
//! programs, terminal REPLs, unknown shells) connects directly.

use std::fmt;

/// Class name reported by a Jupyter (ZMQ kernel) shell.
pub const NOTEBOOK_SHELL: &str = "ZMQInteractiveShell";

/// Class name reported by an interactive shell running in a terminal.
pub const TERMINAL_SHELL: &str = "TerminalInteractiveShell";

/// Identity of the active interactive shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShellIdentity {
    class_name: String,
}

impl ShellIdentity {
    /// Create an identity from the shell's reported class name.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// The reported class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// Classification of where the code is running.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ExecutionContext {
    /// Notebook or JupyterLab kernel.
    Notebook,
    /// Interactive shell in a terminal.
    Terminal,
    /// Some other interactive shell (hosted notebooks, IDE consoles).
    Other(String),
    /// No interactive shell at all, or no way to tell.
    #[default]
    Script,
}

impl ExecutionContext {
    /// Classify a shell by its reported class name.
    #[must_use]
    pub fn from_shell(shell: &ShellIdentity) -> Self {
        match shell.class_name() {
            NOTEBOOK_SHELL => Self::Notebook,
            TERMINAL_SHELL => Self::Terminal,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true only for notebook kernels.
    #[must_use]
    pub const fn is_notebook(&self) -> bool {
        matches!(self, Self::Notebook)
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notebook => write!(f, "notebook"),
            Self::Terminal => write!(f, "terminal"),
            Self::Other(name) => write!(f, "other({name})"),
            Self::Script => write!(f, "script"),
        }
    }
}
