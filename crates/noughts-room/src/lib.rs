//! The authoritative game core: rooms and the registry that owns them.
//!
//! Everything with a real invariant lives here — player assignment, turn
//! order, move acceptance, room teardown. The connection layer feeds
//! events in and delivers the broadcast payloads that come back out; it
//! never mutates room state itself.
//!
//! # Key types
//!
//! - [`Room`] — one game: board, current turn, up to two players
//! - [`RoomRegistry`] — name-keyed map owning every active room
//! - [`RoomError`] — why a transition was refused

mod error;
mod registry;
mod room;

pub use error::RoomError;
pub use registry::{Finished, Joined, MoveApplied, RoomRegistry};
pub use room::{Room, MAX_PLAYERS};
