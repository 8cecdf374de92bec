//! Pseudo-legal move generation.
//!
//! "Pseudo-legal" means legal by the piece's movement pattern while
//! ignoring whether the mover's own king is left in check; the
//! [`Game`](crate::Game) layer filters for check safety. Generation is
//! dispatched on the [`PieceKind`] tag, one module per movement family.
//! Every generator rejects out-of-bounds targets before testing occupancy,
//! and never emits the mover's own square or a capture of its own color.
//!
//! En passant and castling are not modeled.

mod pawn;
mod sliding;
mod step;


use crate::board::Board;
use crate::types::{Move, PieceKind, Position};

/// All pseudo-legal moves for the piece on `from`.
///
/// Returns an empty vector when the square is empty.
pub fn pseudo_legal(board: &Board, from: Position) -> Vec<Move> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Rook => sliding::moves(board, from, piece, sliding::ROOK_RAYS),
        PieceKind::Bishop => sliding::moves(board, from, piece, sliding::BISHOP_RAYS),
        PieceKind::Queen => {
            let mut moves = sliding::moves(board, from, piece, sliding::ROOK_RAYS);
            moves.extend(sliding::moves(board, from, piece, sliding::BISHOP_RAYS));
            moves
        }
        PieceKind::King => step::moves(board, from, piece, step::KING_OFFSETS),
        PieceKind::Knight => step::moves(board, from, piece, step::KNIGHT_OFFSETS),
        PieceKind::Pawn => pawn::moves(board, from, piece),
    }
}

/// True when any of `attacker`'s pieces has a pseudo-legal move landing on
/// `target`. Used for check detection, so pseudo-legal is exactly right:
/// a pinned piece still gives check.
pub fn attacks_square(board: &Board, attacker: crate::types::Color, target: Position) -> bool {
    board
        .pieces_of(attacker)
        .any(|(pos, _)| pseudo_legal(board, pos).iter().any(|mv| mv.to == target))
}
