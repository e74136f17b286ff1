//! Application Ports (Driven)
//!
//! Ports define how this crate uses the external connectivity library and
//! the runtime it is embedded in.

mod event_loop_port;
mod gateway_port;
mod shell_port;

pub use event_loop_port::EventLoopPort;
pub use gateway_port::GatewayPort;
pub use shell_port::{IntrospectionError, ShellIntrospectionPort};
