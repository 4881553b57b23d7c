//! Clock invariant: clocks only count down, and never both run out.

use super::super::{ChainGame, Slot};
use super::Invariant;

/// Invariant: no clock exceeds its starting budget, and at most one clock is
/// at zero.
pub struct ClockBoundsInvariant;

impl Invariant<ChainGame> for ClockBoundsInvariant {
    fn holds(game: &ChainGame) -> bool {
        let clocks = game.clocks();
        let first = clocks.get(Slot::First);
        let second = clocks.get(Slot::Second);

        let bounded = first.remaining() <= first.initial() && second.remaining() <= second.initial();
        let one_expired_at_most = !(first.is_expired() && second.is_expired());

        bounded && one_expired_at_most
    }

    fn description() -> &'static str {
        "Clocks never exceed their budget and never both expire"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Clocks, DEFAULT_POINTS_MULTIPLIER};

    #[test]
    fn test_ticking_game_holds() {
        let mut game = ChainGame::new(3, DEFAULT_POINTS_MULTIPLIER);
        for _ in 0..5 {
            game.tick();
            assert!(ClockBoundsInvariant::holds(&game));
        }
    }

    #[test]
    fn test_both_expired_violates() {
        let mut game = ChainGame::new(1, DEFAULT_POINTS_MULTIPLIER);
        game.clocks = Clocks::new(0);
        assert!(!ClockBoundsInvariant::holds(&game));
    }
}
