//! Logging setup.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Filter directives (default: `ib_session=info`)
//!
//! # Usage
//!
//! ```ignore
//! use ib_session::infrastructure::telemetry;
//!
//! telemetry::init_tracing(&telemetry::TelemetryConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "ib_session=info";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_directive: String,
    /// Include the event target (module path).
    pub with_target: bool,
    /// Colourise output.
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_directive: DEFAULT_DIRECTIVE.to_string(),
            with_target: true,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Use a different fallback filter.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Disable colours (notebook cells render escape codes verbatim).
    #[must_use]
    pub const fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Build the filter: `RUST_LOG` if it parses, the fallback otherwise.
    pub fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        EnvFilter::try_from_default_env().or_else(|_| {
            EnvFilter::try_new(&self.default_directive)
                .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))
        })
    }
}

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
    /// A global subscriber is already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    InitError(String),
}

/// Install the global fmt subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = config.env_filter()?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::InitError(e.to_string()))
}
