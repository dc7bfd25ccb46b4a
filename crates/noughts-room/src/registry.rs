//! The room registry: single source of truth for all active rooms.
//!
//! Process-wide state — empty at start, discarded at stop, nothing
//! persisted. The server guards the whole registry with one async mutex,
//! held from the transition through broadcast enqueue, which serializes
//! all mutations to any given room and keeps enqueue order equal to
//! mutation order. Cross-room serialization comes along with that; an
//! accepted cost at this scale.
//!
//! Transitions return outcome structs that bundle the broadcast payload
//! with the room's player list. The registry decides *what* to say and
//! *to whom*; delivery belongs to the connection layer.

use std::collections::HashMap;

use noughts_protocol::{Board, Mark};
use noughts_transport::ConnectionId;

use crate::{Room, RoomError};

/// Outcome of a successful `join`: what to broadcast, and to whom.
#[derive(Debug, Clone)]
pub struct Joined {
    /// The `startGame` payload — the room's turn *before* the post-join
    /// flip. The stored turn already differs from this value.
    pub starting_player: Mark,
    /// Everyone currently in the room (both players), in join order.
    pub players: Vec<ConnectionId>,
}

/// Outcome of an accepted move: the `updateBoard` payload.
#[derive(Debug, Clone)]
pub struct MoveApplied {
    /// The full board after the move.
    pub board: Board,
    /// The role whose turn is next (`nextPlayer` on the wire).
    pub next_player: Mark,
    /// Everyone currently in the room.
    pub players: Vec<ConnectionId>,
}

/// Outcome of a reported game end. The room is already gone when the
/// caller sees this.
#[derive(Debug, Clone)]
pub struct Finished {
    /// The reported winner; `None` means a draw.
    pub winner: Option<Mark>,
    /// Who was in the room when it ended.
    pub players: Vec<ConnectionId>,
}

/// Owns every active room, keyed by the caller-supplied room name.
///
/// No other component retains room state beyond one handled event.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a room with `creator` as its first player.
    ///
    /// Fails with [`RoomError::AlreadyExists`] if the name is taken, in
    /// which case nothing is mutated.
    pub fn create(
        &mut self,
        room: &str,
        creator: ConnectionId,
        creator_name: &str,
    ) -> Result<(), RoomError> {
        if self.rooms.contains_key(room) {
            return Err(RoomError::AlreadyExists(room.to_owned()));
        }
        self.rooms
            .insert(room.to_owned(), Room::new(creator, creator_name));
        tracing::info!(room, name = creator_name, %creator, "room created");
        Ok(())
    }

    /// Adds the second player to a room.
    ///
    /// On success the returned [`Joined`] carries the pre-flip starting
    /// turn for the `startGame` broadcast; the stored turn has already
    /// been toggled once (see [`Room::admit`] — reproduced from the
    /// original protocol, which clients' turn tracking depends on).
    pub fn join(
        &mut self,
        room: &str,
        joiner: ConnectionId,
        joiner_name: &str,
    ) -> Result<Joined, RoomError> {
        let state = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| RoomError::NotFound(room.to_owned()))?;
        if state.is_full() {
            return Err(RoomError::RoomFull(room.to_owned()));
        }

        let starting_player = state.admit(joiner, joiner_name);
        tracing::info!(room, name = joiner_name, %joiner, "player joined");

        Ok(Joined {
            starting_player,
            players: state.players().to_vec(),
        })
    }

    /// Applies a move in a room.
    ///
    /// Accepted iff the room exists and the cell is empty; the submitting
    /// connection is deliberately not checked against the current turn.
    /// A rejected move leaves board and turn untouched and must not be
    /// broadcast.
    pub fn make_move(
        &mut self,
        room: &str,
        index: usize,
    ) -> Result<MoveApplied, RoomError> {
        let state = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| RoomError::NotFound(room.to_owned()))?;

        let (board, next_player) =
            state.place(index).ok_or(RoomError::InvalidMove {
                room: room.to_owned(),
                index,
            })?;

        tracing::debug!(room, index, %next_player, "move applied");

        Ok(MoveApplied {
            board,
            next_player,
            players: state.players().to_vec(),
        })
    }

    /// Records a client-reported game end and removes the room.
    ///
    /// The reported winner is trusted as-is — the server never checks it
    /// against the board. The room name becomes immediately reusable.
    pub fn finish(
        &mut self,
        room: &str,
        winner: Option<Mark>,
    ) -> Result<Finished, RoomError> {
        let state = self
            .rooms
            .remove(room)
            .ok_or_else(|| RoomError::NotFound(room.to_owned()))?;

        match winner {
            Some(mark) => tracing::info!(room, winner = %mark, "game over"),
            None => tracing::info!(room, "game over: draw"),
        }

        Ok(Finished {
            winner,
            players: state.players().to_vec(),
        })
    }

    /// Read-only lookup, used by tests and introspection.
    pub fn get(&self, room: &str) -> Option<&Room> {
        self.rooms.get(room)
    }

    /// Deletes a room. Idempotent — a missing name is a no-op.
    pub fn remove(&mut self, room: &str) {
        if self.rooms.remove(room).is_some() {
            tracing::info!(room, "room removed");
        }
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Names of all active rooms.
    pub fn room_names(&self) -> Vec<String> {
        self.rooms.keys().cloned().collect()
    }
}
