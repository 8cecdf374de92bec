//! Sliding pieces: rook, bishop, and the queen as their union.

use crate::board::Board;
use crate::types::{Move, Piece, Position};

pub const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Walk each ray one square at a time. A ray ends at the board edge or on
/// the first occupied square, which is included only as an opposite-color
/// capture.
pub fn moves(board: &Board, from: Position, piece: Piece, rays: [(i8, i8); 4]) -> Vec<Move> {
    let mut moves = Vec::new();
    for (d_row, d_col) in rays {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.get(next) {
                None => {
                    moves.push(Move::new(from, next));
                    current = next;
                }
                Some(occupant) => {
                    if occupant.color != piece.color {
                        moves.push(Move::new(from, next));
                    }
                    break;
                }
            }
        }
    }
    moves
}
