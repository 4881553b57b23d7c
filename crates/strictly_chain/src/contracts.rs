//! Contract-based validation for chain moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} apply {Q}.

use super::invariants::{ChainInvariants, InvariantSet};
use super::word::starts_chain;
use super::{ChainGame, MoveError, Word};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Contract for appending a word.
///
/// Preconditions:
/// - Game is in progress
/// - Word links to the previous word
///
/// Postconditions:
/// - Exactly one move was appended and earlier moves are untouched
/// - All chain invariants hold
pub struct MoveContract;

impl Contract<ChainGame, Word> for MoveContract {
    #[instrument(skip(game))]
    fn pre(game: &ChainGame, word: &Word) -> Result<(), MoveError> {
        if !game.is_in_progress() {
            return Err(MoveError::GameOver);
        }
        if !starts_chain(word.as_str(), game.last_word().map(Word::as_str)) {
            return Err(MoveError::ChainMismatch(game.required_letter().unwrap_or('a')));
        }
        Ok(())
    }

    #[instrument(skip_all)]
    fn post(before: &ChainGame, after: &ChainGame) -> Result<(), MoveError> {
        let appended_one = after.moves().len() == before.moves().len() + 1
            && after.moves().starts_with(before.moves());
        if !appended_one {
            warn!("Move history was rewritten");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history must grow by exactly one move".to_string(),
            ));
        }

        ChainInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
