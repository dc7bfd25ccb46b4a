//! Wire protocol for the noughts server.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Board model** ([`Mark`], [`Board`], [`Verdict`]) — the 3x3 grid,
//!   the two role markers, and the pure win/draw evaluator that every
//!   client replicates locally.
//! - **Events** ([`ClientEvent`], [`ServerEvent`]) — the tagged JSON
//!   messages that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events are
//!   converted to and from text frames.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! The protocol layer sits between the transport (text frames) and the
//! room layer (authoritative state). It knows nothing about connections
//! or rooms — only message shapes.

mod board;
mod codec;
mod error;
mod events;

pub use board::{Board, Mark, Verdict};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use events::{ClientEvent, ServerEvent};
