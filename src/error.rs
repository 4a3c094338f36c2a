use thiserror::Error;

use crate::square::Square;

/// Errors reported by the rules engine.
///
/// [`ChessError::IllegalMove`] is the one callers are expected to
/// handle during normal play. The other variants signal misuse of the
/// API, such as asking about a piece that was never placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A coordinate pair outside the 8x8 board.
    #[error("coordinates ({row}, {col}) are outside the board")]
    OutOfRange { row: i32, col: i32 },

    /// The supplied piece is not on the board.
    #[error("the supplied piece is not on the board")]
    PieceNotFound,

    /// The requested move is not legal for the side to move.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}
