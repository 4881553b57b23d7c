//! Moves and move errors.
//!
//! A move is an accepted word recorded in the append-only history. Rejected
//! candidates never become moves.

use super::{Slot, Word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// An accepted word in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Seat that played the word.
    pub slot: Slot,
    /// The normalized word.
    pub word: Word,
    /// Points earned.
    pub points: u32,
    /// When the move was recorded. Non-decreasing along the history.
    pub played_at: DateTime<Utc>,
    /// Short definition reported by the judge, if any.
    pub definition: Option<String>,
}

impl Move {
    /// Creates a new move.
    #[instrument(skip(definition))]
    pub fn new(
        slot: Slot,
        word: Word,
        points: u32,
        played_at: DateTime<Utc>,
        definition: Option<String>,
    ) -> Self {
        Self {
            slot,
            word,
            points,
            played_at,
            definition,
        }
    }

    /// Returns the seat that played this move.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Returns the word.
    pub fn word(&self) -> &Word {
        &self.word
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {} (+{})", self.slot, self.word, self.points)
    }
}

/// Error raised by the local rules, before any outside judge is asked.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Nothing left after normalization.
    #[display("Move is empty")]
    EmptyMove,

    /// The word does not start with the previous word's last letter.
    #[display("Word must start with '{}'", _0.to_ascii_uppercase())]
    ChainMismatch(char),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// A seat tried to move out of turn.
    #[display("It's not {:?}'s turn", _0)]
    WrongPlayer(Slot),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_mismatch_message_uses_upper_case() {
        assert_eq!(
            MoveError::ChainMismatch('e').to_string(),
            "Word must start with 'E'"
        );
    }

    #[test]
    fn test_move_display() {
        let action = Move::new(
            Slot::First,
            Word::parse("apple").unwrap(),
            75,
            Utc::now(),
            None,
        );
        assert_eq!(action.to_string(), "First: apple (+75)");
    }
}
