//! The game state machine: board plus turn color and game-over flag.

use crate::board::Board;
use crate::error::MoveError;
use crate::move_gen;
use crate::types::{Color, Move, Piece, Position};
use serde::{Deserialize, Serialize};

/// One chess game in progress.
///
/// Owns the board exclusively. The turn flips only as a side effect of a
/// successfully applied move, and the game-over flag is monotonic: once
/// [`set_over`](Game::set_over) is called nothing resets it. Terminal
/// detection (checkmate/stalemate) is the caller's job after a committed
/// move, matching the session layer's notification flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    over: bool,
}

impl Game {
    /// A fresh game from the standard setup, white to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            turn: Color::White,
            over: false,
        }
    }

    /// A game over an arbitrary position, for tests and restored records.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Mark the game terminal. There is deliberately no inverse.
    pub fn set_over(&mut self) {
        self.over = true;
    }

    /// Legal moves for the piece on `from`: pseudo-legal moves that do not
    /// leave the mover's own king attacked.
    ///
    /// Each candidate is applied to a board snapshot (with promotion
    /// substitution) and discarded if the king is attacked afterwards.
    /// Empty when the square is empty or off the board. Turn order is not
    /// considered here; [`make_move`](Game::make_move) enforces it.
    pub fn legal_moves(&self, from: Position) -> Vec<Move> {
        if !from.in_bounds() {
            return Vec::new();
        }
        let Some(piece) = self.board.get(from) else {
            return Vec::new();
        };
        move_gen::pseudo_legal(&self.board, from)
            .into_iter()
            .filter(|&mv| {
                let simulated = Self::apply_to(self.board.snapshot(), piece, mv);
                !Self::king_attacked(&simulated, piece.color)
            })
            .collect()
    }

    /// True if `color`'s king is currently attacked by any opposing
    /// pseudo-legal move.
    pub fn is_in_check(&self, color: Color) -> bool {
        Self::king_attacked(&self.board, color)
    }

    /// In check with no legal move anywhere.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.cannot_move(color)
    }

    /// Not in check, but no legal move anywhere.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.cannot_move(color)
    }

    /// Validate and commit a move, flipping the turn on success.
    ///
    /// Rejection order follows the legality contract: off-board square,
    /// then empty start square, then membership in the legal set, then
    /// turn ownership. On any rejection the state is unchanged.
    ///
    /// Coordinates come straight off the wire, so the range check here is
    /// the one that keeps an out-of-range square from reaching the board's
    /// indexing.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        for square in [mv.from, mv.to] {
            if !square.in_bounds() {
                return Err(MoveError::OffBoard { square });
            }
        }
        let piece = self
            .board
            .get(mv.from)
            .ok_or(MoveError::EmptySquare { square: mv.from })?;
        if !self.legal_moves(mv.from).contains(&mv) {
            return Err(MoveError::Illegal { mv });
        }
        if piece.color != self.turn {
            return Err(MoveError::OutOfTurn { color: piece.color });
        }

        self.board = Self::apply_to(self.board.snapshot(), piece, mv);
        self.turn = self.turn.opponent();
        Ok(())
    }

    /// Apply a move to a board without validation, substituting the
    /// promotion kind when present.
    fn apply_to(mut board: Board, piece: Piece, mv: Move) -> Board {
        let placed = match mv.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        board.set(mv.from, None);
        board.set(mv.to, Some(placed));
        board
    }

    fn king_attacked(board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king) => move_gen::attacks_square(board, color.opponent(), king),
            // Kingless test positions cannot be in check.
            None => false,
        }
    }

    fn cannot_move(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .all(|(pos, _)| self.legal_moves(pos).is_empty())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
