use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::square::Square;

/// The two sides. White owns rows 0 and 1 at the start and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// The other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row step for this side's pawns: White advances towards row 7.
    pub(crate) fn forward(self) -> i32 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// The back rank, where the king and rooks start.
    pub(crate) fn home_row(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }

    /// The rank this side's pawns start on, from which a double push is
    /// allowed.
    pub(crate) fn pawn_row(self) -> usize {
        match self {
            Player::White => 1,
            Player::Black => 6,
        }
    }
}

/// The six kinds of chess piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece: what it is, who owns it, and whether it has ever moved.
/// The `has_moved` flag only matters for castling eligibility but is
/// tracked for every piece.
///
/// Pieces are plain values. Two pieces with equal fields are equal, so
/// board queries that take a `Piece` match on its description rather
/// than on some notion of identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
    pub has_moved: bool,
}

impl Piece {
    /// A piece that has not moved yet.
    pub fn new(kind: PieceKind, owner: Player) -> Piece {
        Piece {
            kind,
            owner,
            has_moved: false,
        }
    }

    /// Squares this piece could move to from `from`, ignoring whether
    /// the mover's own king would be left attacked. Occupancy rules are
    /// applied: moves stop at blockers, and a destination holding a
    /// friendly piece or either king is never produced.
    ///
    /// `from` is taken on trust; [`Board::legal_moves`] is the checked
    /// entry point.
    pub fn available_moves(&self, from: Square, board: &Board) -> Vec<Square> {
        let mut moves = Vec::new();
        match self.kind {
            PieceKind::Pawn => pawn_moves(self.owner, from, board, &mut moves),
            PieceKind::Knight => {
                offset_moves(self.owner, from, board, &KNIGHT_OFFSETS, &mut moves)
            }
            PieceKind::Bishop => {
                sliding_moves(self.owner, from, board, &DIAGONAL_DIRECTIONS, &mut moves)
            }
            PieceKind::Rook => {
                sliding_moves(self.owner, from, board, &STRAIGHT_DIRECTIONS, &mut moves)
            }
            PieceKind::Queen => {
                sliding_moves(self.owner, from, board, &STRAIGHT_DIRECTIONS, &mut moves);
                sliding_moves(self.owner, from, board, &DIAGONAL_DIRECTIONS, &mut moves);
            }
            PieceKind::King => {
                offset_moves(self.owner, from, board, &KING_OFFSETS, &mut moves);
                castling_moves(self, from, board, &mut moves);
            }
        }
        moves
    }
}

/// Orthogonal step directions, shared by rook and queen rays.
pub(crate) const STRAIGHT_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Diagonal step directions, shared by bishop and queen rays.
pub(crate) const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// The knight's eight jumps.
pub(crate) const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The king's eight single steps.
pub(crate) const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Walks each direction until the edge or a blocker. A capturable
/// blocker is included as a destination; anything else ends the ray
/// without one.
fn sliding_moves(
    owner: Player,
    from: Square,
    board: &Board,
    directions: &[(i32, i32)],
    moves: &mut Vec<Square>,
) {
    for &(dr, dc) in directions {
        let mut row = from.row() as i32 + dr;
        let mut col = from.col() as i32 + dc;
        while board.is_in_board(row, col) {
            let target = Square::from_row_col(row as usize, col as usize);
            if !board.square_is_occupied(target) {
                moves.push(target);
            } else {
                if board.capturable_by(target, owner) {
                    moves.push(target);
                }
                break;
            }
            row += dr;
            col += dc;
        }
    }
}

/// Fixed-offset destinations for the knight and the king's single
/// steps.
fn offset_moves(
    owner: Player,
    from: Square,
    board: &Board,
    offsets: &[(i32, i32)],
    moves: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        let row = from.row() as i32 + dr;
        let col = from.col() as i32 + dc;
        if !board.is_in_board(row, col) {
            continue;
        }
        let target = Square::from_row_col(row as usize, col as usize);
        if !board.square_is_occupied(target) || board.capturable_by(target, owner) {
            moves.push(target);
        }
    }
}

fn pawn_moves(owner: Player, from: Square, board: &Board, moves: &mut Vec<Square>) {
    let dir = owner.forward();
    let row = from.row() as i32;
    let col = from.col() as i32;

    // Pushes never capture. The double push exists only from the
    // starting rank and needs both squares ahead empty.
    let ahead = row + dir;
    if board.is_in_board(ahead, col) {
        let one = Square::from_row_col(ahead as usize, col as usize);
        if !board.square_is_occupied(one) {
            moves.push(one);
            if from.row() == owner.pawn_row() && board.is_in_board(ahead + dir, col) {
                let two = Square::from_row_col((ahead + dir) as usize, col as usize);
                if !board.square_is_occupied(two) {
                    moves.push(two);
                }
            }
        }
    }

    // Captures go one square diagonally forward, onto an opposing
    // piece or onto the square an enemy pawn just double-pushed over.
    for dc in [-1, 1] {
        if !board.is_in_board(ahead, col + dc) {
            continue;
        }
        let target = Square::from_row_col(ahead as usize, (col + dc) as usize);
        if board.capturable_by(target, owner)
            || (!board.square_is_occupied(target) && board.en_passant_target(owner) == Some(target))
        {
            moves.push(target);
        }
    }
}

/// Adds the castling destinations, two files left or right of the
/// king's starting square.
fn castling_moves(king: &Piece, from: Square, board: &Board, moves: &mut Vec<Square>) {
    let owner = king.owner;
    let home = owner.home_row();

    // The king must be unmoved on its starting square, and castling is
    // never available while in check.
    if king.has_moved || from.row() != home || from.col() != 4 {
        return;
    }
    let opponent = owner.opponent();
    if board.is_attacked(from, opponent) {
        return;
    }

    let rooks = board.unmoved_rooks(owner);
    let has_rook = |col: usize| rooks.iter().any(|square| square.col() == col);
    let empty = |col: usize| !board.square_is_occupied(Square::from_row_col(home, col));
    let safe = |col: usize| !board.is_attacked(Square::from_row_col(home, col), opponent);

    // Kingside: both squares between king and rook empty, the square
    // the king crosses and the one it lands on both unattacked.
    if has_rook(7) && empty(5) && empty(6) && safe(5) && safe(6) {
        moves.push(Square::from_row_col(home, 6));
    }
    // Queenside: three squares between, same attack rules. The rook's
    // neighbour square only has to be empty.
    if has_rook(0) && empty(1) && empty(2) && empty(3) && safe(3) && safe(2) {
        moves.push(Square::from_row_col(home, 2));
    }
}
