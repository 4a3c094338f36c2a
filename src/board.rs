use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::moves::Move;
use crate::piece::{
    Piece, PieceKind, Player, DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    STRAIGHT_DIRECTIONS,
};
use crate::square::Square;
use crate::BOARD_SIZE;

/// A position as compared for repetition: what stands where and whose
/// turn it is. `has_moved` flags and move history are deliberately not
/// part of the comparison, so the same placement reached through a
/// different move order still counts as a repeat.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    squares: [[Option<(PieceKind, Player)>; BOARD_SIZE]; BOARD_SIZE],
    to_move: Player,
}

/// The full game state: piece placement, side to move, the last move
/// played, and a tally of every position reached so far.
///
/// During play [`Board::apply_move`] is the only mutator; it validates
/// against [`Board::legal_moves`] and fails with
/// [`ChessError::IllegalMove`] rather than ignoring a bad request.
/// [`Board::set_piece`] bypasses the rules for setup and tests.
#[derive(Clone, Serialize, Deserialize)]
pub struct Board {
    pub(crate) squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    pub(crate) current_player: Player,
    pub(crate) previous_move: Option<Move>,
    pub(crate) position_history: Vec<(Snapshot, u32)>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces, White to move. Useful for setting up
    /// test positions.
    pub fn empty() -> Board {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            current_player: Player::White,
            previous_move: None,
            position_history: Vec::new(),
        }
    }

    /// The standard starting position, White to move.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(kind, Player::White));
            board.squares[7][col] = Some(Piece::new(kind, Player::Black));
        }
        for col in 0..BOARD_SIZE {
            board.squares[1][col] = Some(Piece::new(PieceKind::Pawn, Player::White));
            board.squares[6][col] = Some(Piece::new(PieceKind::Pawn, Player::Black));
        }
        board
    }

    /// The side to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The last move applied, if any.
    pub fn previous_move(&self) -> Option<Move> {
        self.previous_move
    }

    /// Whether raw coordinates name a square on the board.
    pub fn is_in_board(&self, row: i32, col: i32) -> bool {
        let range = 0..BOARD_SIZE as i32;
        range.contains(&row) && range.contains(&col)
    }

    /// Places a piece, or clears the square with `None`. No rules are
    /// applied and no history is recorded.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row()][square.col()] = piece;
    }

    /// The piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    /// Scans for a piece equal to `piece`, row by row from row 0.
    pub fn find_piece(&self, piece: Piece) -> Result<Square, ChessError> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.squares[row][col] == Some(piece) {
                    return Ok(Square::from_row_col(row, col));
                }
            }
        }
        Err(ChessError::PieceNotFound)
    }

    pub fn square_is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Whether the side to move could capture on `square`: it holds an
    /// opposing piece that is not a king. Empty squares simply report
    /// `false`.
    pub fn square_has_capturable_piece(&self, square: Square) -> bool {
        self.capturable_by(square, self.current_player)
    }

    /// Capture test relative to an arbitrary player. Kings are never
    /// capturable.
    pub(crate) fn capturable_by(&self, square: Square, player: Player) -> bool {
        match self.piece_at(square) {
            Some(piece) => piece.owner != player && piece.kind != PieceKind::King,
            None => false,
        }
    }

    /// Corner squares of the side to move still holding a rook that
    /// has never moved. Castling needs one of these on the relevant
    /// side.
    pub fn rook_in_starting_position(&self) -> Vec<Square> {
        self.unmoved_rooks(self.current_player)
    }

    pub(crate) fn unmoved_rooks(&self, player: Player) -> Vec<Square> {
        let home = player.home_row();
        [0, BOARD_SIZE - 1]
            .into_iter()
            .map(|col| Square::from_row_col(home, col))
            .filter(|&corner| {
                matches!(
                    self.piece_at(corner),
                    Some(piece)
                        if piece.kind == PieceKind::Rook
                            && piece.owner == player
                            && !piece.has_moved
                )
            })
            .collect()
    }

    /// Whether any piece of `by` attacks `square`.
    ///
    /// Works by scanning outwards from the target for each attack
    /// pattern instead of generating the attacker's moves. The
    /// difference matters: move generation never produces a
    /// king-occupied destination and pawn pushes are not attacks, so a
    /// destination-set lookup would miss exactly the attacks this
    /// query exists to find.
    pub fn is_attacked(&self, square: Square, by: Player) -> bool {
        let row = square.row() as i32;
        let col = square.col() as i32;

        for (dr, dc) in KNIGHT_OFFSETS {
            if self.attacker_at(row + dr, col + dc, by, &[PieceKind::Knight]) {
                return true;
            }
        }

        for (dr, dc) in KING_OFFSETS {
            if self.attacker_at(row + dr, col + dc, by, &[PieceKind::King]) {
                return true;
            }
        }

        // A pawn attacks diagonally forward, so look one row back from
        // the target along the attacker's direction of travel.
        let pawn_row = row - by.forward();
        for dc in [-1, 1] {
            if self.attacker_at(pawn_row, col + dc, by, &[PieceKind::Pawn]) {
                return true;
            }
        }

        // Sliding attacks: the first piece met along each ray decides.
        for (dr, dc) in STRAIGHT_DIRECTIONS {
            if self.ray_attacker(row, col, dr, dc, by, &[PieceKind::Rook, PieceKind::Queen]) {
                return true;
            }
        }
        for (dr, dc) in DIAGONAL_DIRECTIONS {
            if self.ray_attacker(row, col, dr, dc, by, &[PieceKind::Bishop, PieceKind::Queen]) {
                return true;
            }
        }

        false
    }

    fn attacker_at(&self, row: i32, col: i32, by: Player, kinds: &[PieceKind]) -> bool {
        if !self.is_in_board(row, col) {
            return false;
        }
        match self.squares[row as usize][col as usize] {
            Some(piece) => piece.owner == by && kinds.contains(&piece.kind),
            None => false,
        }
    }

    fn ray_attacker(
        &self,
        row: i32,
        col: i32,
        dr: i32,
        dc: i32,
        by: Player,
        kinds: &[PieceKind],
    ) -> bool {
        let mut r = row + dr;
        let mut c = col + dc;
        while self.is_in_board(r, c) {
            if let Some(piece) = self.squares[r as usize][c as usize] {
                return piece.owner == by && kinds.contains(&piece.kind);
            }
            r += dr;
            c += dc;
        }
        false
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.current_player)
    }

    /// Whether `player`'s king is attacked. A board without that king
    /// (possible in hand-built positions) is never in check.
    pub fn is_in_check(&self, player: Player) -> bool {
        match self.find_king(player) {
            Some(square) => self.is_attacked(square, player.opponent()),
            None => false,
        }
    }

    fn find_king(&self, player: Player) -> Option<Square> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.squares[row][col] {
                    if piece.kind == PieceKind::King && piece.owner == player {
                        return Some(Square::from_row_col(row, col));
                    }
                }
            }
        }
        None
    }

    /// Destinations for a piece located by value, before king safety
    /// is considered. Fails if no equal piece is on the board.
    pub fn available_moves(&self, piece: Piece) -> Result<Vec<Square>, ChessError> {
        let from = self.find_piece(piece)?;
        Ok(piece.available_moves(from, self))
    }

    /// Legal destinations from `from`: the piece's available moves
    /// minus any that would leave the mover's own king attacked.
    /// Empty when the square is empty or holds an off-turn piece.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        let piece = match self.piece_at(from) {
            Some(piece) if piece.owner == self.current_player => piece,
            _ => return Vec::new(),
        };

        piece
            .available_moves(from, self)
            .into_iter()
            .filter(|&to| !self.leaves_king_attacked(piece.owner, from, to))
            .collect()
    }

    /// Plays the move out on a scratch copy and reports whether the
    /// mover's king ends up attacked.
    fn leaves_king_attacked(&self, mover: Player, from: Square, to: Square) -> bool {
        let mut scratch = self.clone();
        scratch.apply_unchecked(from, to);
        scratch.is_in_check(mover)
    }

    /// Validates and applies a move for the side to move.
    ///
    /// On success the board is updated (captured pieces removed, the
    /// turn passed to the opponent) and the new position is recorded
    /// for repetition detection. On failure the board is untouched.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), ChessError> {
        if !self.legal_moves(from).contains(&to) {
            return Err(ChessError::IllegalMove { from, to });
        }
        self.apply_unchecked(from, to);
        self.record_position();
        Ok(())
    }

    /// Move mechanics without validation or history. Shared by
    /// `apply_move` and the scratch copies of the legality filter,
    /// which must not pollute the repetition tally.
    fn apply_unchecked(&mut self, from: Square, to: Square) {
        let mut piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return,
        };

        // En passant is the only capture whose victim is not on the
        // destination: a pawn switching files onto an empty square
        // takes the pawn it passed.
        if piece.kind == PieceKind::Pawn && from.col() != to.col() && !self.square_is_occupied(to) {
            self.squares[from.row()][to.col()] = None;
        }

        piece.has_moved = true;
        self.squares[to.row()][to.col()] = Some(piece);
        self.squares[from.row()][from.col()] = None;

        // A king travelling two files is castling; bring the rook over
        // to the square the king crossed.
        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            let (rook_from, rook_to) = if to.col() == 6 { (7, 5) } else { (0, 3) };
            if let Some(mut rook) = self.squares[to.row()][rook_from].take() {
                rook.has_moved = true;
                self.squares[to.row()][rook_to] = Some(rook);
            }
        }

        self.previous_move = Some(Move { from, to });
        self.current_player = self.current_player.opponent();
    }

    /// The square a pawn of `mover` may capture onto en passant: the
    /// one an opposing pawn skipped by double-pushing on the previous
    /// move. `None` in every other situation.
    pub(crate) fn en_passant_target(&self, mover: Player) -> Option<Square> {
        let previous = self.previous_move?;
        let pushed = self.piece_at(previous.to)?;
        if pushed.kind != PieceKind::Pawn || pushed.owner == mover {
            return None;
        }
        if previous.from.row().abs_diff(previous.to.row()) != 2 {
            return None;
        }
        let skipped = (previous.from.row() + previous.to.row()) / 2;
        Some(Square::from_row_col(skipped, previous.to.col()))
    }

    fn snapshot(&self) -> Snapshot {
        let mut squares = [[None; BOARD_SIZE]; BOARD_SIZE];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                squares[row][col] = self.squares[row][col].map(|piece| (piece.kind, piece.owner));
            }
        }
        Snapshot {
            squares,
            to_move: self.current_player,
        }
    }

    /// Whether two boards show the same position: the same kind and
    /// owner on every square and the same side to move. Histories,
    /// `has_moved` flags, and the route taken do not matter.
    pub fn same_position_as(&self, other: &Board) -> bool {
        self.snapshot() == other.snapshot()
    }

    /// Tallies the position just reached. Called once per applied
    /// move, never for setup positions or scratch copies.
    fn record_position(&mut self) {
        let snapshot = self.snapshot();
        for (seen, count) in &mut self.position_history {
            if *seen == snapshot {
                *count += 1;
                return;
            }
        }
        self.position_history.push((snapshot, 1));
    }

    /// Whether any position has now been reached three or more times.
    pub fn threefold_repetition(&self) -> bool {
        self.position_history.iter().any(|(_, count)| *count >= 3)
    }

    /// The side to move is in check and has no legal move: the game is
    /// lost.
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_any_legal_move()
    }

    /// The side to move has no legal move but is not in check: the
    /// game is drawn. Distinct from the repetition draw.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_any_legal_move()
    }

    fn has_any_legal_move(&self) -> bool {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::from_row_col(row, col);
                match self.piece_at(square) {
                    Some(piece) if piece.owner == self.current_player => {
                        if !self.legal_moves(square).is_empty() {
                            return true;
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

/// Renders the grid from Black's back rank down, White pieces in
/// upper case.
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?} to move", self.current_player)?;
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{row} ")?;
            for col in 0..BOARD_SIZE {
                match self.squares[row][col] {
                    Some(piece) => write!(f, "{} ", glyph(piece))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  0 1 2 3 4 5 6 7")
    }
}

fn glyph(piece: Piece) -> char {
    let letter = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.owner {
        Player::White => letter.to_ascii_uppercase(),
        Player::Black => letter,
    }
}
