//! Application Services
//!
//! The three session operations and the scoped helper composing them.

mod connector;
mod environment;
mod scope;

pub use connector::{connect, disconnect};
pub use environment::{detect_context, is_notebook};
pub use scope::{SessionGuard, SessionScope};
