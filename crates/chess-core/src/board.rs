//! 8x8 board model with value-copy snapshots.

use crate::types::{Color, Piece, PieceKind, Position};
use serde::{Deserialize, Serialize};

/// The 64 squares, each holding at most one piece.
///
/// Squares are stored as plain `Copy` values, so [`Board::snapshot`] is a
/// genuinely independent deep copy: legality checking simulates a move on
/// the copy and the original never observes it. The board is always 8x8
/// and callers validate coordinates against `[1, 8]` before indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

/// Back-rank kind order, a-file through h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard chess starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Reset to the standard starting setup, clearing everything else.
    pub fn reset(&mut self) {
        self.squares = [[None; 8]; 8];
        for col in 1..=8u8 {
            let kind = BACK_RANK[(col - 1) as usize];
            self.set(Position::new(1, col), Some(Piece::new(Color::White, kind)));
            self.set(
                Position::new(2, col),
                Some(Piece::new(Color::White, PieceKind::Pawn)),
            );
            self.set(
                Position::new(7, col),
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
            );
            self.set(Position::new(8, col), Some(Piece::new(Color::Black, kind)));
        }
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[(pos.row - 1) as usize][(pos.col - 1) as usize]
    }

    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[(pos.row - 1) as usize][(pos.col - 1) as usize] = piece;
    }

    /// Independent deep copy for move simulation.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Iterate every occupied square as `(position, piece)`.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (1..=8u8).flat_map(move |row| {
            (1..=8u8).filter_map(move |col| {
                let pos = Position::new(row, col);
                self.get(pos).map(|piece| (pos, piece))
            })
        })
    }

    /// Occupied squares belonging to one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Locate a side's king, `None` on malformed boards (tests set up
    /// kingless positions).
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_setup_layout() {
        let board = Board::standard();
        assert_eq!(
            board.get(Position::new(1, 5)),
            Some(Piece::new(Color::White, PieceKind::King)),
            "white king starts on e1"
        );
        assert_eq!(
            board.get(Position::new(8, 4)),
            Some(Piece::new(Color::Black, PieceKind::Queen)),
            "black queen starts on d8"
        );
        for col in 1..=8 {
            assert_eq!(
                board.get(Position::new(2, col)),
                Some(Piece::new(Color::White, PieceKind::Pawn))
            );
            assert_eq!(
                board.get(Position::new(7, col)),
                Some(Piece::new(Color::Black, PieceKind::Pawn))
            );
            assert_eq!(board.get(Position::new(4, col)), None);
        }
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn test_set_and_clear_square() {
        let mut board = Board::empty();
        let pos = Position::new(4, 4);
        board.set(pos, Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(board.get(pos).map(|p| p.kind), Some(PieceKind::Rook));
        board.set(pos, None);
        assert_eq!(board.get(pos), None);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let original = Board::standard();
        let mut copy = original.snapshot();
        copy.set(Position::new(2, 5), None);
        copy.set(
            Position::new(4, 5),
            Some(Piece::new(Color::White, PieceKind::Pawn)),
        );
        assert_eq!(
            original.get(Position::new(2, 5)).map(|p| p.kind),
            Some(PieceKind::Pawn),
            "mutating the snapshot must not touch the original"
        );
        assert_ne!(original, copy);
    }

    #[test]
    fn test_find_king() {
        let board = Board::standard();
        assert_eq!(board.find_king(Color::White), Some(Position::new(1, 5)));
        assert_eq!(board.find_king(Color::Black), Some(Position::new(8, 5)));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }
}
