//! Per-connection handler: event dispatch and broadcast delivery.
//!
//! Each accepted connection runs two tasks: a reader loop (this module's
//! entry point) that decodes client events and applies them through the
//! registry, and a writer task that drains the connection's outbound
//! queue onto the socket. Broadcasts are enqueued while the registry
//! lock is still held, so each connection's queue sees events in
//! mutation order; no lock is ever held across socket I/O — that
//! happens in the writer tasks.

use std::sync::Arc;

use noughts_protocol::{ClientEvent, Codec, JsonCodec, ServerEvent};
use noughts_room::RoomError;
use noughts_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::NoughtsError;

/// Reply texts mirrored from the original protocol — clients display
/// them verbatim.
const MSG_ROOM_CREATED: &str = "Room created: Waiting for the opponent...";
const ERR_JOIN_FAILED: &str = "Room is full or doesn't exist";

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), NoughtsError> {
    let conn_id = conn.id();
    tracing::info!(%conn_id, "player connected");

    let (sender, receiver) = mpsc::unbounded_channel();
    state.peers.lock().await.insert(conn_id, sender);

    let writer = tokio::spawn(write_loop(conn.clone(), state.codec, receiver));

    let result = read_loop(&conn, conn_id, &state).await;

    // Disconnect handling: drop the peer entry so broadcasts skip this
    // connection from now on. The room itself stays registered — only a
    // later `gameOver` tears it down (see DESIGN.md).
    state.peers.lock().await.remove(conn_id);
    writer.abort();
    tracing::info!(%conn_id, "player disconnected");

    result
}

/// Drains the outbound queue onto the socket until the peer entry is
/// removed or the socket dies.
async fn write_loop(
    conn: WebSocketConnection,
    codec: JsonCodec,
    mut receiver: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = receiver.recv().await {
        let text = match codec.encode(&event) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(conn_id = %conn.id(), error = %e, "failed to encode event");
                continue;
            }
        };
        if conn.send(&text).await.is_err() {
            break;
        }
    }
}

/// Receives frames, decodes them, and dispatches until the connection
/// closes.
async fn read_loop(
    conn: &WebSocketConnection,
    conn_id: ConnectionId,
    state: &Arc<ServerState>,
) -> Result<(), NoughtsError> {
    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                return Err(e.into());
            }
        };

        let event: ClientEvent = match state.codec.decode(&text) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode event");
                continue;
            }
        };

        dispatch(conn_id, event, state).await;
    }
}

/// Applies one client event: a registry transition, then enqueue on the
/// peer channels. Lock order is `rooms` then `peers`, and the registry
/// guard is held until the enqueue is done — dropping it earlier would
/// let a concurrent transition on the same room enqueue its snapshot
/// first, and a stale full-board snapshot delivered last sticks.
/// Failures are scoped to this event — nothing here ends the
/// connection.
async fn dispatch(conn_id: ConnectionId, event: ClientEvent, state: &Arc<ServerState>) {
    match event {
        ClientEvent::Create { name, room } => {
            let mut rooms = state.rooms.lock().await;
            let result = rooms.create(&room, conn_id, &name);

            // Both outcomes are informational replies to the creator
            // only — never a broadcast.
            let reply = match result {
                Ok(()) => ServerEvent::Message {
                    text: MSG_ROOM_CREATED.to_owned(),
                },
                Err(RoomError::AlreadyExists(_)) => ServerEvent::Message {
                    text: format!("Room {room} already exists!"),
                },
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "create failed");
                    return;
                }
            };
            state.peers.lock().await.send(conn_id, reply);
        }

        ClientEvent::Join { name, room } => {
            let mut rooms = state.rooms.lock().await;
            let result = rooms.join(&room, conn_id, &name);

            match result {
                Ok(joined) => {
                    // `starting_player` is the pre-flip turn; the stored
                    // turn was already toggled inside the transition.
                    let event = ServerEvent::StartGame {
                        current_player: joined.starting_player,
                    };
                    state.peers.lock().await.broadcast(&joined.players, &event);
                }
                Err(e) => {
                    // Full and missing collapse into one reply, as the
                    // original protocol does.
                    tracing::debug!(%conn_id, room, error = %e, "join rejected");
                    state.peers.lock().await.send(
                        conn_id,
                        ServerEvent::Error {
                            reason: ERR_JOIN_FAILED.to_owned(),
                        },
                    );
                }
            }
        }

        ClientEvent::MakeMove { room, index } => {
            let mut rooms = state.rooms.lock().await;
            let result = rooms.make_move(&room, index);

            match result {
                Ok(applied) => {
                    let event = ServerEvent::UpdateBoard {
                        board: applied.board,
                        next_player: applied.next_player,
                    };
                    state.peers.lock().await.broadcast(&applied.players, &event);
                }
                Err(e @ RoomError::InvalidMove { .. }) => {
                    // The mover alone hears about it; the board, the
                    // turn, and the opponent see nothing.
                    state.peers.lock().await.send(
                        conn_id,
                        ServerEvent::Error {
                            reason: e.to_string(),
                        },
                    );
                }
                Err(e) => {
                    tracing::debug!(%conn_id, room, error = %e, "move ignored");
                }
            }
        }

        ClientEvent::GameOver { room, winner } => {
            let mut rooms = state.rooms.lock().await;
            let result = rooms.finish(&room, winner);

            match result {
                Ok(finished) => {
                    let event = ServerEvent::GameOver {
                        winner: finished.winner,
                    };
                    state.peers.lock().await.broadcast(&finished.players, &event);
                }
                Err(e) => {
                    // A report for a room that no longer exists (e.g.
                    // both clients reported) is a quiet no-op.
                    tracing::debug!(%conn_id, room, error = %e, "game over ignored");
                }
            }
        }
    }
}
