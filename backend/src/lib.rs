//! Session core for multiplayer chess.
//!
//! Turns the single shared [`chess_core::Game`] of each record into a
//! multi-party protocol: the [`SessionCoordinator`] authorizes decoded
//! commands against the rule engine and the collaborator contracts, and
//! the [`ConnectionRegistry`] delivers the resulting events to the right
//! audience. This crate is transport-agnostic; HTTP and WebSocket framing
//! live outside it.

pub mod auth;
pub mod coordinator;
pub mod error;
pub mod registry;
pub mod store;

pub use auth::{AuthLookup, MemoryAuthStore};
pub use coordinator::SessionCoordinator;
pub use error::SessionError;
pub use registry::{ConnectionRegistry, EventSink};
pub use store::{GameRecord, GameStore, MemoryGameStore};
