//! The event types that travel on the wire.
//!
//! Every message is a JSON object of the form
//! `{ "event": "<name>", "data": { ... } }` — the adjacently tagged
//! layout serde produces from `#[serde(tag = "event", content = "data")]`.
//! Event names and payload fields are camelCase to match what the
//! JavaScript client sends and expects.

use serde::{Deserialize, Serialize};

use crate::{Board, Mark};

/// Events sent by a client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// "Create a room with this name and register me as its first player."
    Create { name: String, room: String },

    /// "Add me to this room as the second player."
    Join { name: String, room: String },

    /// "Place the current mark at this cell."
    ///
    /// Note there is no field saying *who* is moving — the server stamps
    /// the cell with the room's current turn, whoever sent the event.
    MakeMove { room: String, index: usize },

    /// "My local evaluator says the game ended." `winner` is `null` for
    /// a draw. The server trusts this report and tears the room down.
    GameOver {
        room: String,
        #[serde(default)]
        winner: Option<Mark>,
    },
}

/// Events sent by the server to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Informational text, delivered to a single connection (the room
    /// creator) — never broadcast.
    Message { text: String },

    /// Both players are present; the game begins. `current_player` is
    /// the role whose move is expected first.
    StartGame { current_player: Mark },

    /// A move was accepted. Full board snapshot plus the role whose
    /// turn is next.
    UpdateBoard { board: Board, next_player: Mark },

    /// The game ended. `winner` is `null` for a draw. The room no
    /// longer exists once this arrives.
    GameOver { winner: Option<Mark> },

    /// A request was rejected. Sent only to the offending connection.
    Error { reason: String },
}
