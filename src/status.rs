use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::Player;

/// The verdict on a position, always judged for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No special condition; play continues.
    InProgress,
    /// The named player is in check but has a legal reply.
    Check(Player),
    /// The named player has delivered mate and won.
    Checkmate(Player),
    /// The side to move is not in check yet has no legal move: drawn.
    Stalemate,
    /// Some position has occurred at least three times: drawn.
    DrawByRepetition,
}

impl GameStatus {
    /// Whether the game has ended. A live check does not end it.
    pub fn is_game_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate(_) | GameStatus::Stalemate | GameStatus::DrawByRepetition
        )
    }
}

impl Board {
    /// Classifies the current position.
    ///
    /// Terminal verdicts take priority over the live check: a mated
    /// player is not merely "in check", and a repetition draw stands
    /// even when the repeated position contains a check, as it does in
    /// a perpetual.
    pub fn status(&self) -> GameStatus {
        if self.is_checkmate() {
            return GameStatus::Checkmate(self.current_player().opponent());
        }
        if self.is_stalemate() {
            return GameStatus::Stalemate;
        }
        if self.threefold_repetition() {
            return GameStatus::DrawByRepetition;
        }
        if self.in_check() {
            return GameStatus::Check(self.current_player());
        }
        GameStatus::InProgress
    }
}
