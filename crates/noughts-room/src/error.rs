//! Error types for the room layer.

/// Errors that can occur during room transitions.
///
/// None of these are fatal — each is scoped to the offending event and
/// leaves every other room untouched.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// A `create` named a room that already exists. No mutation happened;
    /// the caller gets an informational reply, not a broadcast.
    #[error("room \"{0}\" already exists")]
    AlreadyExists(String),

    /// The room does not exist.
    #[error("room \"{0}\" not found")]
    NotFound(String),

    /// The room already has both players.
    #[error("room \"{0}\" is full")]
    RoomFull(String),

    /// The cell is occupied or the index is out of range. Board and
    /// turn are unchanged and nothing was broadcast.
    #[error("cell {index} in room \"{room}\" is not playable")]
    InvalidMove { room: String, index: usize },
}
