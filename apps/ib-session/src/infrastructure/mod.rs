//! Infrastructure Layer
//!
//! Adapters behind the application ports, plus configuration and logging.

pub mod config;
pub mod event_loop;
pub mod shell;
pub mod telemetry;

/// Interactive Brokers adapter (requires the `ibkr` feature).
#[cfg(feature = "ibkr")]
pub mod ibkr;
