//! Chain invariant: every word starts with the previous word's last letter.

use super::super::word::starts_chain;
use super::super::ChainGame;
use super::Invariant;

/// Invariant: each move after the first links to its predecessor.
pub struct ChainLinkedInvariant;

impl Invariant<ChainGame> for ChainLinkedInvariant {
    fn holds(game: &ChainGame) -> bool {
        game.moves()
            .windows(2)
            .all(|pair| starts_chain(pair[1].word.as_str(), Some(pair[0].word.as_str())))
    }

    fn description() -> &'static str {
        "Every word starts with the last letter of the previous word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_POINTS_MULTIPLIER, Word};
    use chrono::Utc;

    #[test]
    fn test_linked_chain_holds() {
        let mut game = ChainGame::new(60, DEFAULT_POINTS_MULTIPLIER);
        for raw in ["zebra", "apple", "energy"] {
            let word = game.check_candidate(raw).unwrap();
            game.apply(word, None, Utc::now()).unwrap();
        }
        assert!(ChainLinkedInvariant::holds(&game));
    }

    #[test]
    fn test_broken_link_violates() {
        let mut game = ChainGame::new(60, DEFAULT_POINTS_MULTIPLIER);
        for raw in ["zebra", "apple"] {
            let word = game.check_candidate(raw).unwrap();
            game.apply(word, None, Utc::now()).unwrap();
        }
        game.moves[1].word = Word::parse("orange").unwrap();
        assert!(!ChainLinkedInvariant::holds(&game));
    }
}
