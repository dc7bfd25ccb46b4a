//! Server builder and accept loop.
//!
//! Ties the layers together: transport (WebSocket) → protocol (JSON
//! events) → room (registry). One handler task per accepted connection.

use std::sync::Arc;

use noughts_protocol::JsonCodec;
use noughts_room::RoomRegistry;
use noughts_transport::{Listener, WebSocketListener};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::peers::PeerMap;
use crate::NoughtsError;

/// Shared server state handed to every connection handler task.
///
/// Both maps sit behind `tokio::sync::Mutex`. Lock order is `rooms`
/// then `peers`: the registry lock serializes all room mutations, and a
/// transition enqueues its broadcasts before releasing it, so every
/// connection's outbound queue sees events in mutation order. Neither
/// lock is ever held across socket I/O — the writer tasks do that.
pub(crate) struct ServerState {
    pub(crate) rooms: Mutex<RoomRegistry>,
    pub(crate) peers: Mutex<PeerMap>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a noughts server.
pub struct NoughtsServerBuilder {
    bind_addr: String,
}

impl NoughtsServerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_owned(),
        }
    }

    /// Sets the address to bind to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_owned();
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<NoughtsServer, NoughtsError> {
        let listener = WebSocketListener::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomRegistry::new()),
            peers: Mutex::new(PeerMap::new()),
            codec: JsonCodec,
        });

        Ok(NoughtsServer { listener, state })
    }
}

impl Default for NoughtsServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running noughts server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct NoughtsServer {
    listener: WebSocketListener,
    state: Arc<ServerState>,
}

impl NoughtsServer {
    /// Creates a new builder.
    pub fn builder() -> NoughtsServerBuilder {
        NoughtsServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until the process is terminated.
    ///
    /// Each accepted connection gets its own handler task; a failed
    /// accept is logged and the loop continues.
    pub async fn run(mut self) -> Result<(), NoughtsError> {
        tracing::info!("noughts server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
