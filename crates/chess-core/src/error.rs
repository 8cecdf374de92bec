//! Error types for the rules engine.

use crate::types::{Color, Move, Position};

/// Why [`Game::make_move`](crate::Game::make_move) rejected a move.
///
/// A rejected move leaves the game state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// One of the move's squares lies outside the board.
    #[error("square ({row}, {col}) is off the board", row = .square.row, col = .square.col)]
    OffBoard { square: Position },

    /// No piece on the move's start square.
    #[error("no piece at {square}")]
    EmptySquare { square: Position },

    /// The move is not in the legal set for its start square.
    #[error("{mv} is not a legal move")]
    Illegal { mv: Move },

    /// The piece belongs to the side that is not on turn.
    #[error("it is not {color}'s turn")]
    OutOfTurn { color: Color },
}
