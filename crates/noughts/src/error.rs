//! Unified error type for the noughts server.

use noughts_protocol::ProtocolError;
use noughts_room::RoomError;
use noughts_transport::TransportError;

/// Top-level error that wraps the layer-specific errors.
///
/// The `#[from]` attributes let `?` convert lower-layer errors
/// automatically. None of these abort the server process — a failed
/// connection just ends its own handler task.
#[derive(Debug, thiserror::Error)]
pub enum NoughtsError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (already exists, not found, full, bad move).
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::BindFailed(std::io::Error::other("taken"));
        let top: NoughtsError = err.into();
        assert!(matches!(top, NoughtsError::Transport(_)));
        assert!(top.to_string().contains("taken"));
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::NotFound("42".into());
        let top: NoughtsError = err.into();
        assert!(matches!(top, NoughtsError::Room(_)));
        assert!(top.to_string().contains("42"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let top: NoughtsError = err.into();
        assert!(matches!(top, NoughtsError::Protocol(_)));
    }
}
