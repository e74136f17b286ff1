//! Domain Layer
//!
//! Plain value types with no infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`session`]: Gateway connection parameters and the per-scope lifecycle
//! - [`shell`]: Execution context classification for interactive shells

pub mod session;
pub mod shell;
