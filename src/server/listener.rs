use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::state::ServerState;

/// Binds the configured address and serves forever.
///
/// A bind failure is returned to the caller; nothing after that point
/// returns.
pub async fn run(cfg: &Config, state: Arc<ServerState>) -> anyhow::Result<()> {
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    serve(listener, state).await
}

/// Accepts connections one at a time and runs each to completion before
/// accepting the next.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, Arc::clone(&state));
        if let Err(e) = conn.run().instrument(info_span!("conn", %peer)).await {
            error!("Connection error from {}: {}", peer, e);
        }
    }
}
