//! Core domain types for the word chain.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the two fixed seats in a session.
///
/// `First` is the initiating participant and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Initiating participant (index 0).
    First,
    /// Opponent (index 1).
    Second,
}

impl Slot {
    /// Returns the seat index (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    /// Returns the seat for an index, if it is 0 or 1.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Slot::First),
            1 => Some(Slot::Second),
            _ => None,
        }
    }

    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// Time-control variant a session is played under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Short clocks.
    Blitz,
    /// Medium clocks.
    Rapid,
    /// Long clocks.
    Classical,
    /// Human against the automated opponent.
    Bot,
}

/// Initial clock budget per mode, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    /// Seconds per side in blitz.
    #[serde(default = "default_blitz_secs")]
    pub blitz_secs: u32,
    /// Seconds per side in rapid.
    #[serde(default = "default_long_secs")]
    pub rapid_secs: u32,
    /// Seconds per side in classical.
    #[serde(default = "default_long_secs")]
    pub classical_secs: u32,
    /// Seconds per side against the bot.
    #[serde(default = "default_long_secs")]
    pub bot_secs: u32,
}

fn default_blitz_secs() -> u32 {
    180
}

fn default_long_secs() -> u32 {
    600
}

impl TimeControl {
    /// Returns the starting seconds for each side in `mode`.
    pub fn initial_secs(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Blitz => self.blitz_secs,
            GameMode::Rapid => self.rapid_secs,
            GameMode::Classical => self.classical_secs,
            GameMode::Bot => self.bot_secs,
        }
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self {
            blitz_secs: default_blitz_secs(),
            rapid_secs: default_long_secs(),
            classical_secs: default_long_secs(),
            bot_secs: default_long_secs(),
        }
    }
}

/// Why a decisive game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum FinishReason {
    /// The loser's clock reached zero.
    Timeout,
    /// The loser resigned.
    Resignation,
    /// An outside party ended the game.
    Adjudication,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One seat won.
    Winner {
        /// Winning seat.
        slot: Slot,
        /// How the game was decided.
        reason: FinishReason,
    },
    /// Both sides agreed to a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Slot> {
        match self {
            Outcome::Winner { slot, .. } => Some(*slot),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was drawn.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner { slot, reason } => write!(f, "{:?} wins by {}", slot, reason),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Lifecycle status of a game.
///
/// A finished game always carries its outcome, so "winner set" and
/// "finished and not drawn" cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves and ticks are accepted.
    InProgress,
    /// Terminal; nothing mutates any more.
    Finished(Outcome),
}

impl GameStatus {
    /// Returns true while the game accepts moves.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameStatus::InProgress)
    }

    /// Returns the outcome once finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Finished(outcome) => Some(*outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slot_opponent_roundtrip() {
        assert_eq!(Slot::First.opponent(), Slot::Second);
        assert_eq!(Slot::Second.opponent().opponent(), Slot::Second);
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(Slot::from_index(0), Some(Slot::First));
        assert_eq!(Slot::from_index(1), Some(Slot::Second));
        assert_eq!(Slot::from_index(2), None);
        assert_eq!(Slot::Second.index(), 1);
    }

    #[test]
    fn test_default_time_controls() {
        let tc = TimeControl::default();
        assert_eq!(tc.initial_secs(GameMode::Blitz), 180);
        for mode in GameMode::iter().filter(|m| *m != GameMode::Blitz) {
            assert_eq!(tc.initial_secs(mode), 600, "{mode}");
        }
    }

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!(GameMode::from_str("blitz").unwrap(), GameMode::Blitz);
        assert_eq!(GameMode::from_str("BOT").unwrap(), GameMode::Bot);
        assert!(GameMode::from_str("bullet").is_err());
    }

    #[test]
    fn test_outcome_winner() {
        let outcome = Outcome::Winner {
            slot: Slot::Second,
            reason: FinishReason::Timeout,
        };
        assert_eq!(outcome.winner(), Some(Slot::Second));
        assert!(!outcome.is_draw());
        assert_eq!(Outcome::Draw.winner(), None);
        assert_eq!(outcome.to_string(), "Second wins by Timeout");
    }
}
