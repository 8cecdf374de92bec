//! Fixed-offset pieces: king and knight.

use crate::board::Board;
use crate::types::{Move, Piece, Position};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// One move per in-bounds offset whose target is empty or holds an
/// opposite-colored piece.
pub fn moves(board: &Board, from: Position, piece: Piece, offsets: [(i8, i8); 8]) -> Vec<Move> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&target| match board.get(target) {
            None => true,
            Some(occupant) => occupant.color != piece.color,
        })
        .map(|target| Move::new(from, target))
        .collect()
}
