use serde::{Deserialize, Serialize};

use crate::square::Square;

/// A move as played: origin and destination.
///
/// Special moves carry no extra data. Castling is a king move of two
/// files and en passant is a pawn capture onto an empty square; the
/// board derives the rook relocation or the removed pawn from the
/// squares alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}
