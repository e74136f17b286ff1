//! Gateway Port (Driven Port)
//!
//! Interface to the external connectivity library that owns the wire
//! protocol, handshake and any reconnect behaviour.

use crate::domain::session::SessionParams;

/// Opens and closes sessions against a gateway process.
///
/// `disconnect` takes the session by value: a closed handle cannot be
/// touched again through this port.
pub trait GatewayPort {
    /// Live connection handle produced by the library.
    type Session;

    /// The library's own failure type. It is passed through untouched.
    type Error: std::error::Error;

    /// Perform the network handshake and return a live handle.
    fn connect(&self, params: &SessionParams) -> Result<Self::Session, Self::Error>;

    /// Request closure of a live handle.
    fn disconnect(&self, session: Self::Session) -> Result<(), Self::Error>;
}
