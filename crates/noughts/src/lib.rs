//! # noughts
//!
//! A room-based real-time tic-tac-toe server. Clients create or join a
//! named room over WebSocket, get one of the two roles, and exchange
//! moves through the server, which holds the authoritative state and
//! broadcasts every transition to both participants.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use noughts::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), NoughtsError> {
//!     let server = NoughtsServerBuilder::new()
//!         .bind("0.0.0.0:3000")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod peers;
mod server;

pub use error::NoughtsError;
pub use server::{NoughtsServer, NoughtsServerBuilder};

/// The commonly needed names in one import.
pub mod prelude {
    pub use crate::{NoughtsError, NoughtsServer, NoughtsServerBuilder};
    pub use noughts_protocol::{
        Board, ClientEvent, Codec, JsonCodec, Mark, ServerEvent, Verdict,
    };
    pub use noughts_room::{RoomError, RoomRegistry};
    pub use noughts_transport::ConnectionId;
}
