//! Pawn movement: single and double pushes, diagonal captures, and the
//! promotion fan-out on the last rank.

use crate::board::Board;
use crate::types::{Color, Move, Piece, Position, PROMOTION_KINDS};

fn direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

fn start_row(color: Color) -> u8 {
    match color {
        Color::White => 2,
        Color::Black => 7,
    }
}

fn last_row(color: Color) -> u8 {
    match color {
        Color::White => 8,
        Color::Black => 1,
    }
}

pub fn moves(board: &Board, from: Position, piece: Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    let dir = direction(piece.color);

    // Forward one, only onto an empty square.
    if let Some(target) = from.offset(dir, 0) {
        if board.get(target).is_none() {
            push(&mut moves, piece, from, target);

            // Forward two from the starting rank, both squares empty. The
            // intermediate square is `target`, already known empty.
            if from.row == start_row(piece.color) {
                if let Some(double) = from.offset(2 * dir, 0) {
                    if board.get(double).is_none() {
                        push(&mut moves, piece, from, double);
                    }
                }
            }
        }
    }

    // Diagonal captures, only onto an opposite-colored piece.
    for d_col in [-1, 1] {
        if let Some(target) = from.offset(dir, d_col) {
            if let Some(occupant) = board.get(target) {
                if occupant.color != piece.color {
                    push(&mut moves, piece, from, target);
                }
            }
        }
    }

    moves
}

/// Append the move, fanning out into the four promotion variants when it
/// lands on the mover's last rank.
fn push(moves: &mut Vec<Move>, piece: Piece, from: Position, to: Position) {
    if to.row == last_row(piece.color) {
        for kind in PROMOTION_KINDS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}
