//! Session error taxonomy.
//!
//! Every variant is recovered by the coordinator and turned into an
//! `Error` event for the originating connection only; none of them crash
//! the coordinator or touch another audience's state. Display strings are
//! the client-facing message text.

use chess_core::MoveError;
use shared::{GameId, ProtocolError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Unknown or invalid auth token.
    #[error("Error: unauthorized")]
    Authentication,

    /// Authenticated, but not allowed: observers acting as players, or a
    /// seated player moving out of turn.
    #[error("Error: {0}")]
    Authorization(String),

    /// No game record under the requested id.
    #[error("Error: game {0} not found")]
    GameNotFound(GameId),

    /// Command issued after the game reached a terminal state.
    #[error("Error: game is already over")]
    GameOver,

    /// The rule engine rejected the move.
    #[error("Error: move not legal: {0}")]
    InvalidMove(#[from] MoveError),

    /// Malformed or unrecognized command at the decode seam.
    #[error("Error: {0}")]
    Protocol(#[from] ProtocolError),
}
