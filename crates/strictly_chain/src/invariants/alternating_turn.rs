//! Alternating turn invariant: seats alternate First, Second, First, ...

use super::super::{ChainGame, Slot};
use super::Invariant;

/// Invariant: seats alternate turns, starting with `First`.
///
/// The seat to move is always the one after the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<ChainGame> for AlternatingTurnInvariant {
    fn holds(game: &ChainGame) -> bool {
        let history = game.moves();

        let alternates = history
            .iter()
            .enumerate()
            .all(|(i, m)| Slot::from_index(i % 2) == Some(m.slot));

        alternates && Slot::from_index(history.len() % 2) == Some(game.to_move())
    }

    fn description() -> &'static str {
        "Seats alternate turns (First, Second, First, ...)"
    }
}
