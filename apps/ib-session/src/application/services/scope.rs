//! Scoped gateway sessions.
//!
//! A [`SessionGuard`] owns one live session and hands it to the
//! disconnector exactly once: through [`SessionGuard::close`], or from its
//! `Drop` impl on early return or panic.
//!
//! [`SessionScope::run`] wraps a closure in a guard. The closure's outcome
//! always wins: a disconnect failure after a failed body is logged as a
//! suppressed secondary failure, and only surfaces when the body succeeded.

use std::ops::{Deref, DerefMut};

use tracing::{debug, error, warn};

use super::connector::{connect, disconnect};
use super::environment::detect_context;
use crate::application::ports::{EventLoopPort, GatewayPort, ShellIntrospectionPort};
use crate::domain::session::{SessionParams, SessionState};

/// Owns a live session until it is closed or dropped.
#[must_use = "dropping the guard disconnects the session immediately"]
pub struct SessionGuard<'g, G>
where
    G: GatewayPort + ?Sized,
{
    gateway: &'g G,
    session: Option<G::Session>,
    params: SessionParams,
    state: SessionState,
}

impl<'g, G> SessionGuard<'g, G>
where
    G: GatewayPort + ?Sized,
{
    /// Take ownership of a session produced by `gateway`.
    pub fn new(gateway: &'g G, session: G::Session, params: SessionParams) -> Self {
        Self {
            gateway,
            session: Some(session),
            params,
            state: SessionState::Open,
        }
    }

    /// Parameters the session was opened with.
    pub const fn params(&self) -> &SessionParams {
        &self.params
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Disconnect now and report the gateway's answer.
    pub fn close(mut self) -> Result<(), G::Error> {
        self.release().unwrap_or(Ok(()))
    }

    /// Hand the session to the disconnector if it has not been already.
    fn release(&mut self) -> Option<Result<(), G::Error>> {
        let session = self.session.take()?;
        if let Err(err) = self.state.transition(SessionState::Closed) {
            error!(error = %err, "Session guard out of sync with its handle");
        }
        debug!(
            host = %self.params.host,
            port = self.params.port,
            client_id = self.params.client_id,
            "Disconnecting gateway session"
        );
        Some(disconnect(self.gateway, session))
    }
}

impl<G> Deref for SessionGuard<'_, G>
where
    G: GatewayPort + ?Sized,
{
    type Target = G::Session;

    #[allow(clippy::expect_used)]
    fn deref(&self) -> &Self::Target {
        self.session
            .as_ref()
            .expect("session is present until the guard is consumed")
    }
}

impl<G> DerefMut for SessionGuard<'_, G>
where
    G: GatewayPort + ?Sized,
{
    #[allow(clippy::expect_used)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session
            .as_mut()
            .expect("session is present until the guard is consumed")
    }
}

impl<G> Drop for SessionGuard<'_, G>
where
    G: GatewayPort + ?Sized,
{
    fn drop(&mut self) {
        let unwinding = std::thread::panicking();
        if let Some(Err(err)) = self.release() {
            warn!(
                error = %err,
                unwinding,
                client_id = self.params.client_id,
                "Failed to disconnect gateway session on scope exit"
            );
        }
    }
}

impl<G> std::fmt::Debug for SessionGuard<'_, G>
where
    G: GatewayPort + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("params", &self.params)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Gateway, event loop and shell introspection wired together.
#[derive(Debug, Clone, Default)]
pub struct SessionScope<G, L, S> {
    gateway: G,
    event_loop: L,
    shell: S,
}

impl<G, L, S> SessionScope<G, L, S>
where
    G: GatewayPort,
    L: EventLoopPort,
    S: ShellIntrospectionPort,
{
    /// Create a scope from its three collaborators.
    pub const fn new(gateway: G, event_loop: L, shell: S) -> Self {
        Self {
            gateway,
            event_loop,
            shell,
        }
    }

    /// The wrapped gateway.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Connect and return a guard owning the session.
    ///
    /// The execution context is detected on every call, so the event loop is
    /// started at most once per opened session.
    pub fn open(&self, params: &SessionParams) -> Result<SessionGuard<'_, G>, G::Error> {
        let context = detect_context(&self.shell);
        let session = connect(&self.gateway, &self.event_loop, &context, params)?;
        Ok(SessionGuard::new(&self.gateway, session, params.clone()))
    }

    /// Run `body` against a fresh session and disconnect afterwards.
    ///
    /// A connect failure is returned without calling `body` or the
    /// disconnector. Errors from `body` are returned unchanged.
    pub fn run<T, E, F>(&self, params: &SessionParams, body: F) -> Result<T, E>
    where
        E: From<G::Error>,
        F: FnOnce(&mut G::Session) -> Result<T, E>,
    {
        let mut guard = self.open(params)?;
        match body(&mut *guard) {
            Ok(value) => {
                guard.close()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(close_err) = guard.close() {
                    warn!(
                        error = %close_err,
                        client_id = params.client_id,
                        "Disconnect failed after session body error, keeping body error"
                    );
                }
                Err(err)
            }
        }
    }

    /// [`Self::run`] with default parameters.
    pub fn run_default<T, E, F>(&self, body: F) -> Result<T, E>
    where
        E: From<G::Error>,
        F: FnOnce(&mut G::Session) -> Result<T, E>,
    {
        self.run(&SessionParams::default(), body)
    }
}
