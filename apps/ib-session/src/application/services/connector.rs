//! Connect and disconnect.

use tracing::{debug, info};

use crate::application::ports::{EventLoopPort, GatewayPort};
use crate::domain::session::SessionParams;
use crate::domain::shell::ExecutionContext;

/// Open a session against the gateway described by `params`.
///
/// Inside a notebook the library's event loop is started first. Handshake
/// failures are returned exactly as the gateway produced them.
pub fn connect<G, L>(
    gateway: &G,
    event_loop: &L,
    context: &ExecutionContext,
    params: &SessionParams,
) -> Result<G::Session, G::Error>
where
    G: GatewayPort + ?Sized,
    L: EventLoopPort + ?Sized,
{
    if context.is_notebook() {
        debug!("Notebook kernel detected, starting event loop");
        event_loop.start_loop();
    }

    debug!(
        host = %params.host,
        port = params.port,
        client_id = params.client_id,
        context = %context,
        "Connecting to gateway"
    );

    let session = gateway.connect(params)?;

    info!(
        host = %params.host,
        port = params.port,
        client_id = params.client_id,
        "Gateway session opened"
    );
    Ok(session)
}

/// Close a live session.
pub fn disconnect<G>(gateway: &G, session: G::Session) -> Result<(), G::Error>
where
    G: GatewayPort + ?Sized,
{
    gateway.disconnect(session)
}
