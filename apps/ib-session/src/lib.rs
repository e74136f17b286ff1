#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! IB Session - Scoped Gateway Sessions
//!
//! Opens a session against an Interactive Brokers Gateway or TWS process and
//! guarantees it is closed when the owning scope exits, whether the scope
//! completes, returns an error or panics. Protocol, handshake and reconnect
//! behaviour belong to the wrapped connectivity library.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: `SessionParams`, trading mode and gateway ports, the
//!   per-scope lifecycle, execution context classification
//! - **Application**: ports for the gateway, its event loop and shell
//!   introspection; `connect`, `disconnect`, `detect_context` and the scoped
//!   `SessionScope` / `SessionGuard`
//! - **Infrastructure**: environment configuration, logging, env-based
//!   shell detection, the blocking-client loop port and (feature `ibkr`) the
//!   `ibapi` adapter
//!
//! # Flow
//!
//! ```text
//! detect_context ──notebook?──► EventLoopPort::start_loop
//!        │                               │
//!        └──────────────► GatewayPort::connect ──► body(&mut session)
//!                                                        │
//!                          GatewayPort::disconnect ◄─────┘ (every exit path)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Session value types with no external dependencies.
pub mod domain;

/// Application layer - Ports and session services.
pub mod application;

/// Infrastructure layer - Adapters, configuration and logging.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::session::{
    DEFAULT_CLIENT_ID, DEFAULT_HOST, GatewayKind, SessionParams, SessionState,
    StateTransitionError, TradingMode,
};
pub use domain::shell::{ExecutionContext, NOTEBOOK_SHELL, ShellIdentity, TERMINAL_SHELL};

// Ports and services
pub use application::ports::{
    EventLoopPort, GatewayPort, IntrospectionError, ShellIntrospectionPort,
};
pub use application::services::{
    SessionGuard, SessionScope, connect, detect_context, disconnect, is_notebook,
};

// Infrastructure
pub use infrastructure::config::{ConfigError, SessionConfig};
pub use infrastructure::event_loop::BlockingClientLoop;
pub use infrastructure::shell::{EnvShellIntrospector, NoShell};
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryError, init_tracing};

#[cfg(feature = "ibkr")]
pub use infrastructure::ibkr::{
    IbGateway, IbSessionScope, ib_scope, ib_session, open_session, shared_scope,
};
