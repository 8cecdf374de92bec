//! Chess rules engine for the multiplayer server.
//!
//! Pure game logic with no knowledge of connections or protocol: an 8x8
//! board model, per-piece pseudo-legal move generation, and a game state
//! machine that filters moves for check safety and detects terminal
//! positions. The session layer in `backend` drives this through
//! [`Game`] and never touches the board directly.

pub mod board;
pub mod error;
pub mod game;
pub mod move_gen;
pub mod types;

pub use board::Board;
pub use error::MoveError;
pub use game::Game;
pub use types::{Color, Move, Piece, PieceKind, Position};
