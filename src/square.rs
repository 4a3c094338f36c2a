use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::BOARD_SIZE;

/// A board coordinate. `row` 0 is White's back rank, `row` 7 Black's;
/// `col` 0 is the queenside edge.
///
/// Both fields are guaranteed to be in `0..8`: the only public
/// constructor is the validating [`Square::at`], so every `Square` a
/// caller can hold names a real square and can index the board without
/// further checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Builds a square from raw coordinates, rejecting anything outside
    /// the board.
    pub fn at(row: i32, col: i32) -> Result<Square, ChessError> {
        let range = 0..BOARD_SIZE as i32;
        if range.contains(&row) && range.contains(&col) {
            Ok(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(ChessError::OutOfRange { row, col })
        }
    }

    /// Constructor for coordinates already known to be in range, e.g.
    /// after a `Board::is_in_board` check or a loop over `0..BOARD_SIZE`.
    pub(crate) fn from_row_col(row: usize, col: usize) -> Square {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Square {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_accepts_every_board_coordinate() {
        for row in 0..8 {
            for col in 0..8 {
                let square = Square::at(row, col).expect("in-range coordinates");
                assert_eq!(square.row(), row as usize);
                assert_eq!(square.col(), col as usize);
            }
        }
    }

    #[test]
    fn at_rejects_out_of_range_coordinates() {
        for (row, col) in [(-1, 0), (0, -1), (8, 0), (0, 8), (8, 8), (-3, 12)] {
            assert_eq!(
                Square::at(row, col),
                Err(ChessError::OutOfRange { row, col }),
                "({row}, {col}) should be rejected"
            );
        }
    }

    #[test]
    fn squares_with_equal_coordinates_are_equal() {
        assert_eq!(Square::at(3, 4).unwrap(), Square::at(3, 4).unwrap());
        assert_ne!(Square::at(3, 4).unwrap(), Square::at(4, 3).unwrap());
    }

    #[test]
    fn display_shows_row_then_col() {
        let square = Square::at(6, 2).unwrap();
        assert_eq!(square.to_string(), "(6, 2)");
    }
}
