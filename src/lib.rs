//! A chess rules engine: per-piece move generation, whole-board
//! legality filtering, and game status classification (check,
//! checkmate, stalemate, draw by repetition).
//!
//! [`Board`] owns all mutable game state. Callers drive a game with
//! [`Board::legal_moves`] and [`Board::apply_move`] and read the result
//! back through [`Board::status`]. Everything else (rendering, input,
//! clocks, search) belongs to the caller.

pub mod board;
pub mod error;
pub mod moves;
pub mod piece;
pub mod square;
pub mod status;

pub use board::Board;
pub use error::ChessError;
pub use moves::Move;
pub use piece::{Piece, PieceKind, Player};
pub use square::Square;
pub use status::GameStatus;

/// Ranks and files per side of the (square) board.
pub const BOARD_SIZE: usize = 8;
