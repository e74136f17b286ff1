//! Application Layer
//!
//! - [`ports`]: Interfaces for the connectivity library, its event loop and
//!   shell introspection
//! - [`services`]: Environment detection, connect/disconnect and scoped
//!   sessions built on those ports

pub mod ports;
pub mod services;
