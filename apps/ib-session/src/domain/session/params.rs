//! Connection parameters for a gateway session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loopback address of a locally running gateway.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Client identifier used when the caller does not pick one.
pub const DEFAULT_CLIENT_ID: i32 = 1;

/// Trading mode of the account behind a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    /// Paper trading (simulated).
    #[default]
    Paper,
    /// Live trading (real money).
    Live,
}

impl TradingMode {
    /// Parse trading mode from string. Anything other than `live` is paper.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "live" => Self::Live,
            _ => Self::Paper,
        }
    }

    /// Classify a port by the well-known gateway and TWS ports.
    ///
    /// Returns `None` for ports that are not one of the documented defaults.
    #[must_use]
    pub const fn from_port(port: u16) -> Option<Self> {
        match port {
            4002 | 7497 => Some(Self::Paper),
            4001 | 7496 => Some(Self::Live),
            _ => None,
        }
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Get the mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paper => write!(f, "PAPER"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Kind of gateway process accepting API connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Headless IB Gateway.
    #[default]
    Gateway,
    /// Trader Workstation desktop terminal.
    Tws,
}

impl GatewayKind {
    /// Parse gateway kind from string. Anything other than `tws` is IB Gateway.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "tws" => Self::Tws,
            _ => Self::Gateway,
        }
    }

    /// Well-known API port for this gateway kind in the given mode.
    #[must_use]
    pub const fn port(&self, mode: TradingMode) -> u16 {
        match (self, mode) {
            (Self::Gateway, TradingMode::Paper) => 4002,
            (Self::Gateway, TradingMode::Live) => 4001,
            (Self::Tws, TradingMode::Paper) => 7497,
            (Self::Tws, TradingMode::Live) => 7496,
        }
    }
}

/// Host, port and client identifier of one session.
///
/// `client_id` must be unique per concurrent session against the same
/// gateway process. That is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionParams {
    /// Address of the gateway/terminal process.
    pub host: String,
    /// API port of the gateway.
    pub port: u16,
    /// Client identifier for this session.
    pub client_id: i32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: GatewayKind::Gateway.port(TradingMode::Paper),
            client_id: DEFAULT_CLIENT_ID,
        }
    }
}

impl SessionParams {
    /// Create parameters from an explicit triple.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, client_id: i32) -> Self {
        Self {
            host: host.into(),
            port,
            client_id,
        }
    }

    /// Default parameters pointed at the well-known port of a gateway kind.
    #[must_use]
    pub fn for_gateway(kind: GatewayKind, mode: TradingMode) -> Self {
        Self {
            port: kind.port(mode),
            ..Default::default()
        }
    }

    /// Set the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the client identifier.
    #[must_use]
    pub const fn with_client_id(mut self, client_id: i32) -> Self {
        self.client_id = client_id;
        self
    }

    /// `host:port` as accepted by socket-style connectors.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Trading mode implied by the port, if it is a well-known one.
    #[must_use]
    pub const fn trading_mode(&self) -> Option<TradingMode> {
        TradingMode::from_port(self.port)
    }
}

impl fmt::Display for SessionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} (client {})", self.host, self.port, self.client_id)
    }
}
