//! Decoded command and event model for game sessions.
//!
//! This is the in-process contract between a transport (WebSocket, test
//! harness, local loopback) and the session coordinator: four inbound
//! commands and three outbound event kinds. Wire framing and handshakes
//! live outside this workspace; the JSON helpers here are the one decode
//! seam, so a malformed frame surfaces as [`ProtocolError`] before it ever
//! reaches the coordinator.

use chess_core::{Game, Move};
use serde::{Deserialize, Serialize};

/// Identifier of one game record in the store.
pub type GameId = u32;

/// Client-to-server commands, tagged by `command` in JSON.
///
/// Every command carries the caller's auth token; identity is resolved
/// server-side per command, never trusted from the payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Join a game's audience, as a seated player or an observer.
    Connect { auth_token: String, game_id: GameId },
    /// Submit a move for the sender's seat.
    MakeMove {
        auth_token: String,
        game_id: GameId,
        #[serde(rename = "move")]
        mv: Move,
    },
    /// Concede the game. Seated players only.
    Resign { auth_token: String, game_id: GameId },
    /// Exit the audience, freeing the sender's seat if they held one.
    Leave { auth_token: String, game_id: GameId },
}

/// Server-to-client events, tagged by `event` in JSON.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full state snapshot of the game as committed.
    LoadGame { game: Game },
    /// Human-readable happenings in the game: joins, moves, check, mate,
    /// resignation, departures.
    Notification { message: String },
    /// A rejected command, delivered only to its sender.
    Error { message: String },
}

/// Malformed or unrecognized input at the decode seam.
#[derive(Debug, thiserror::Error)]
#[error("malformed command: {0}")]
pub struct ProtocolError(#[from] serde_json::Error);

impl ClientCommand {
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl ServerEvent {
    pub fn to_json(&self) -> String {
        // The event enum contains nothing a Serializer can reject.
        serde_json::to_string(self).expect("server events always serialize")
    }
}
