//! Gateway session parameters and lifecycle.

mod params;
mod state;

pub use params::{DEFAULT_CLIENT_ID, DEFAULT_HOST, GatewayKind, SessionParams, TradingMode};
pub use state::{SessionState, StateTransitionError};
