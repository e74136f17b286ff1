//! Interactive Brokers Adapter
//!
//! [`GatewayPort`] over the `ibapi` crate, plus the ready-wired entry points
//! most callers want:
//!
//! ```ignore
//! use ib_session::{SessionParams, ib_session};
//!
//! let server_time = ib_session(&SessionParams::default(), |client| {
//!     Ok::<_, ibapi::Error>(client.server_time()?)
//! })?;
//! ```
//!
//! `ibapi`'s blocking [`Client`] runs its own reader thread, so the scope
//! pairs it with [`BlockingClientLoop`].

use std::sync::LazyLock;

use ibapi::Client;

use super::event_loop::BlockingClientLoop;
use super::shell::EnvShellIntrospector;
use crate::application::ports::GatewayPort;
use crate::application::services::{SessionGuard, SessionScope};
use crate::domain::session::SessionParams;

/// Gateway adapter backed by [`ibapi::Client`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IbGateway;

impl GatewayPort for IbGateway {
    type Session = Client;
    type Error = ibapi::Error;

    fn connect(&self, params: &SessionParams) -> Result<Client, ibapi::Error> {
        Client::connect(&params.address(), params.client_id)
    }

    fn disconnect(&self, session: Client) -> Result<(), ibapi::Error> {
        // The 1.x client only shuts down through Drop, which cannot fail.
        drop(session);
        Ok(())
    }
}

/// Scope wired to the live gateway and env detection.
pub type IbSessionScope = SessionScope<IbGateway, BlockingClientLoop, EnvShellIntrospector>;

static IB_SCOPE: LazyLock<IbSessionScope> = LazyLock::new(ib_scope);

/// Build an [`IbSessionScope`] from the process environment.
#[must_use]
pub fn ib_scope() -> IbSessionScope {
    SessionScope::new(
        IbGateway,
        BlockingClientLoop,
        EnvShellIntrospector::from_env(),
    )
}

/// Process-wide scope behind [`ib_session`] and [`open_session`].
#[must_use]
pub fn shared_scope() -> &'static IbSessionScope {
    &IB_SCOPE
}

/// Run `body` against a fresh Interactive Brokers session.
///
/// The session is disconnected on every exit path; see [`SessionScope::run`].
pub fn ib_session<T, E, F>(params: &SessionParams, body: F) -> Result<T, E>
where
    E: From<ibapi::Error>,
    F: FnOnce(&mut Client) -> Result<T, E>,
{
    shared_scope().run(params, body)
}

/// Open a session whose guard disconnects when dropped.
///
/// # Errors
///
/// Returns the `ibapi` error if the handshake fails.
pub fn open_session(
    params: &SessionParams,
) -> Result<SessionGuard<'static, IbGateway>, ibapi::Error> {
    shared_scope().open(params)
}
