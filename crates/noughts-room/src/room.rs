//! A single room: board, turn state, and player assignment.

use std::collections::HashMap;

use noughts_protocol::{Board, Mark};
use noughts_transport::ConnectionId;

/// A room holds exactly one game and at most this many players.
pub const MAX_PLAYERS: usize = 2;

/// One game in progress: the board, whose turn is next, and the
/// connections playing it.
///
/// Invariants maintained by the transition methods:
/// - `players` preserves join order and never exceeds [`MAX_PLAYERS`];
/// - `current_player` alternates strictly after each accepted move;
/// - exactly the cells written by accepted moves are non-empty.
#[derive(Debug, Clone)]
pub struct Room {
    board: Board,
    current_player: Mark,
    players: Vec<ConnectionId>,
    player_names: HashMap<ConnectionId, String>,
}

impl Room {
    /// Creates a room with its first player. X always opens.
    pub(crate) fn new(creator: ConnectionId, creator_name: &str) -> Self {
        let mut player_names = HashMap::new();
        player_names.insert(creator, creator_name.to_owned());
        Self {
            board: Board::new(),
            current_player: Mark::X,
            players: vec![creator],
            player_names,
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The role whose move is expected next.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Connections in this room, in join order.
    pub fn players(&self) -> &[ConnectionId] {
        &self.players
    }

    /// The display name a connection registered with, if it is in this
    /// room.
    pub fn player_name(&self, conn: ConnectionId) -> Option<&str> {
        self.player_names.get(&conn).map(String::as_str)
    }

    /// Returns `true` if both player slots are taken.
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Admits the second player and returns the starting turn to
    /// broadcast.
    ///
    /// The returned value is the *pre-flip* `current_player`; the stored
    /// value is toggled once before this returns. The flip is part of
    /// join sequencing, not a move: it lines the server's turn tracking
    /// up with the joiner's first `makeMove`, and clients depend on the
    /// broadcast carrying the pre-flip value. The caller checks
    /// [`is_full`](Self::is_full) first.
    pub(crate) fn admit(&mut self, joiner: ConnectionId, joiner_name: &str) -> Mark {
        debug_assert!(!self.is_full());
        self.players.push(joiner);
        self.player_names.insert(joiner, joiner_name.to_owned());

        let starting_player = self.current_player;
        self.current_player = self.current_player.other();
        starting_player
    }

    /// Applies a move at `index` if the cell is playable.
    ///
    /// Acceptance is based solely on cell emptiness — the room does not
    /// know which connection submitted the move, and the server does not
    /// check it against the current turn (inherited trust boundary; see
    /// DESIGN.md). On success the cell is stamped with `current_player`,
    /// the turn toggles, and the new `(board, next_player)` pair to
    /// broadcast is returned. On failure nothing changes.
    pub(crate) fn place(&mut self, index: usize) -> Option<(Board, Mark)> {
        if !self.board.is_playable(index) {
            return None;
        }
        self.board.set(index, self.current_player);
        self.current_player = self.current_player.other();
        Some((self.board, self.current_player))
    }
}
