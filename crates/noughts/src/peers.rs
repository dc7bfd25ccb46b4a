//! The peer map: one outbound channel per live connection.
//!
//! Rooms store [`ConnectionId`]s, never sockets. When a transition says
//! "tell these connections", the handler looks the ids up here and
//! queues the event on each peer's channel; a per-connection writer task
//! drains the queue onto the socket. Queued order is delivery order, so
//! each connection sees events in the server's mutation order.

use std::collections::HashMap;

use noughts_protocol::ServerEvent;
use noughts_transport::ConnectionId;
use tokio::sync::mpsc;

/// Sender half of a connection's outbound queue.
pub(crate) type PeerSender = mpsc::UnboundedSender<ServerEvent>;

/// All currently connected peers.
#[derive(Debug, Default)]
pub(crate) struct PeerMap {
    peers: HashMap<ConnectionId, PeerSender>,
}

impl PeerMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly accepted connection.
    pub(crate) fn insert(&mut self, conn: ConnectionId, sender: PeerSender) {
        self.peers.insert(conn, sender);
    }

    /// Removes a disconnected peer. Idempotent.
    pub(crate) fn remove(&mut self, conn: ConnectionId) {
        self.peers.remove(&conn);
    }

    /// Queues an event for a single connection. Silently drops it if the
    /// peer is gone — a disconnected player simply stops receiving.
    pub(crate) fn send(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.peers.get(&conn) {
            let _ = sender.send(event);
        }
    }

    /// Queues an event for every listed connection and no others.
    pub(crate) fn broadcast(&self, conns: &[ConnectionId], event: &ServerEvent) {
        for conn in conns {
            self.send(*conn, event.clone());
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.peers.len()
    }
}
