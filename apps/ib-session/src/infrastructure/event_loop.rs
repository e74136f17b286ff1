//! Event loop adapters.
//!
//! `ibapi`'s blocking client reads the gateway socket on its own thread and
//! never schedules work on the caller's loop. A notebook kernel's loop
//! therefore cannot conflict with it, and the integration step has nothing
//! to start.

use tracing::debug;

use crate::application::ports::EventLoopPort;

/// Event loop port for connectivity libraries that run a dedicated reader
/// thread instead of a cooperative loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingClientLoop;

impl EventLoopPort for BlockingClientLoop {
    fn start_loop(&self) {
        debug!("Client reads on its own thread, no event loop to start");
    }
}
