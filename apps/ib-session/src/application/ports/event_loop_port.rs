//! Event Loop Port (Driven Port)

/// Starts the connectivity library's cooperative event loop.
///
/// Called once per session open when running inside a notebook kernel.
/// Implementations must tolerate being called again after the loop is
/// already running.
pub trait EventLoopPort {
    /// Start the loop, or do nothing if it is already running.
    fn start_loop(&self);
}
