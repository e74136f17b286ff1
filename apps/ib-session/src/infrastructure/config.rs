//! Session Configuration
//!
//! Connection settings loaded from environment variables. A `.env` file in
//! the working directory is honoured by [`SessionConfig::from_env`].
//!
//! # Environment Variables
//!
//! - `IB_HOST`: Gateway host (default: 127.0.0.1)
//! - `IB_PORT`: Gateway port (default: well-known port for kind and mode)
//! - `IB_CLIENT_ID`: Client identifier (default: 1)
//! - `IB_TRADING_MODE`: paper | live (default: paper)
//! - `IB_GATEWAY_KIND`: gateway | tws (default: gateway)

use std::env::VarError;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::session::{
    DEFAULT_CLIENT_ID, DEFAULT_HOST, GatewayKind, SessionParams, TradingMode,
};

/// Gateway host variable.
pub const ENV_HOST: &str = "IB_HOST";
/// Gateway port variable.
pub const ENV_PORT: &str = "IB_PORT";
/// Client identifier variable.
pub const ENV_CLIENT_ID: &str = "IB_CLIENT_ID";
/// Trading mode variable.
pub const ENV_TRADING_MODE: &str = "IB_TRADING_MODE";
/// Gateway kind variable.
pub const ENV_GATEWAY_KIND: &str = "IB_GATEWAY_KIND";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),

    /// Environment variable could not be parsed.
    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

/// Connection settings for a gateway session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Gateway host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Explicit port. When absent the well-known port for `gateway_kind`
    /// and `trading_mode` is used.
    #[serde(default)]
    pub port: Option<u16>,
    /// Client identifier.
    #[serde(default = "default_client_id")]
    pub client_id: i32,
    /// Paper or live.
    #[serde(default)]
    pub trading_mode: TradingMode,
    /// IB Gateway or TWS.
    #[serde(default)]
    pub gateway_kind: GatewayKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            client_id: default_client_id(),
            trading_mode: TradingMode::default(),
            gateway_kind: GatewayKind::default(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_client_id() -> i32 {
    DEFAULT_CLIENT_ID
}

impl SessionConfig {
    /// Load configuration from the process environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an empty, unparsable or
    /// non-unicode value.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is empty, unparsable or not valid
    /// unicode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let host = match read_var(&lookup, ENV_HOST)? {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyValue(ENV_HOST.to_string()));
            }
            Some(value) => value.trim().to_string(),
            None => defaults.host,
        };

        let port = parse_var(&lookup, ENV_PORT)?;
        let client_id = parse_var(&lookup, ENV_CLIENT_ID)?.unwrap_or(defaults.client_id);

        let trading_mode = read_var(&lookup, ENV_TRADING_MODE)?
            .map(|s| TradingMode::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let gateway_kind = read_var(&lookup, ENV_GATEWAY_KIND)?
            .map(|s| GatewayKind::from_str_case_insensitive(&s))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            client_id,
            trading_mode,
            gateway_kind,
        })
    }

    /// Port that will actually be dialled.
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port
            .unwrap_or_else(|| self.gateway_kind.port(self.trading_mode))
    }

    /// Session parameters for the connector.
    #[must_use]
    pub fn params(&self) -> SessionParams {
        SessionParams::new(self.host.clone(), self.effective_port(), self.client_id)
    }
}

fn read_var<F>(lookup: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: std::str::FromStr,
{
    read_var(lookup, key)?
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}
