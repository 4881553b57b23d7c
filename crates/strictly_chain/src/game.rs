//! The word-chain state machine.

use super::contracts::{Contract, MoveContract};
use super::word::{points_for, required_letter, starts_chain};
use super::{ClockTick, Clocks, FinishReason, GameStatus, Move, MoveError, Outcome, Slot, Word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Result of advancing game time by one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over or paused; nothing changed.
    Idle,
    /// The running clock moved.
    Running {
        /// Seat whose clock ran.
        slot: Slot,
        /// Seconds left on that clock.
        remaining: u32,
    },
    /// The running clock reached zero and the game is now finished.
    Expired(Outcome),
}

/// Authoritative state of one word-chain game.
///
/// Moves are append-only and [`ChainGame::apply`] is the only way to add one.
/// Exactly one clock is eligible to tick at a time: the one belonging to
/// [`ChainGame::to_move`], and only while the game is not paused. Once
/// finished, nothing here mutates again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainGame {
    pub(crate) moves: Vec<Move>,
    pub(crate) to_move: Slot,
    pub(crate) clocks: Clocks,
    pub(crate) status: GameStatus,
    #[serde(default)]
    paused: bool,
    multiplier: u32,
}

impl ChainGame {
    /// Starts a game with both clocks at `initial_secs`, seat `First` to move.
    #[instrument]
    pub fn new(initial_secs: u32, multiplier: u32) -> Self {
        Self {
            moves: Vec::new(),
            to_move: Slot::First,
            clocks: Clocks::new(initial_secs),
            status: GameStatus::InProgress,
            paused: false,
            multiplier,
        }
    }

    /// Returns the move history, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the seat whose turn it is.
    pub fn to_move(&self) -> Slot {
        self.to_move
    }

    /// Returns both clocks.
    pub fn clocks(&self) -> &Clocks {
        &self.clocks
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true while moves are accepted.
    pub fn is_in_progress(&self) -> bool {
        self.status.is_in_progress()
    }

    /// True while the clocks are frozen by [`ChainGame::pause`].
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Points per letter.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// The last accepted word, if any.
    pub fn last_word(&self) -> Option<&Word> {
        self.moves.last().map(|m| &m.word)
    }

    /// Letter the next word must start with (`None` for the opener).
    pub fn required_letter(&self) -> Option<char> {
        required_letter(self.last_word().map(Word::as_str))
    }

    /// Total points per seat, in seat order.
    pub fn scores(&self) -> [u32; 2] {
        self.moves.iter().fold([0, 0], |mut acc, m| {
            acc[m.slot.index()] += m.points;
            acc
        })
    }

    /// Runs the local checks on raw input: game state, normalization and the
    /// chain rule, in that order. Nothing is mutated.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn check_candidate(&self, raw: &str) -> Result<Word, MoveError> {
        if !self.is_in_progress() {
            return Err(MoveError::GameOver);
        }

        let word = Word::parse(raw)?;

        if !starts_chain(word.as_str(), self.last_word().map(Word::as_str)) {
            let expected = self.required_letter().unwrap_or('a');
            debug!(word = %word, expected = %expected, "Chain rule failed");
            return Err(MoveError::ChainMismatch(expected));
        }

        Ok(word)
    }

    /// Appends an accepted word for the seat to move and passes the turn.
    ///
    /// The move is built on a copy of the state, which replaces `self` only
    /// once the checks pass. On error nothing changes.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self, definition), fields(slot = ?self.to_move))]
    pub fn apply(
        &mut self,
        word: Word,
        definition: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Move, MoveError> {
        MoveContract::pre(self, &word)?;

        let played_at = match self.moves.last() {
            Some(last) if last.played_at > now => last.played_at,
            _ => now,
        };
        let points = points_for(&word, self.multiplier);
        let action = Move::new(self.to_move, word, points, played_at, definition);

        let mut next = self.clone();
        next.moves.push(action.clone());
        next.to_move = next.to_move.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        *self = next;
        info!(word = %action.word, points, next = ?self.to_move, "Move applied");
        Ok(action)
    }

    /// Advances the running clock by one unit.
    ///
    /// When it reaches zero the other seat wins on time.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_in_progress() || self.paused {
            return TickOutcome::Idle;
        }

        let running = self.to_move;
        match self.clocks.tick(running) {
            ClockTick::Running(remaining) => TickOutcome::Running {
                slot: running,
                remaining,
            },
            ClockTick::Expired => {
                let outcome = Outcome::Winner {
                    slot: running.opponent(),
                    reason: FinishReason::Timeout,
                };
                info!(expired = ?running, "Clock expired");
                self.status = GameStatus::Finished(outcome);
                TickOutcome::Expired(outcome)
            }
        }
    }

    /// Freezes both clocks. Moves are still accepted.
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> Result<(), MoveError> {
        if !self.is_in_progress() {
            return Err(MoveError::GameOver);
        }
        debug!("Clocks paused");
        self.paused = true;
        Ok(())
    }

    /// Lets the running clock tick again.
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Result<(), MoveError> {
        if !self.is_in_progress() {
            return Err(MoveError::GameOver);
        }
        debug!("Clocks resumed");
        self.paused = false;
        Ok(())
    }

    /// Ends the game with the given outcome.
    #[instrument(skip(self))]
    pub fn finish(&mut self, outcome: Outcome) -> Result<(), MoveError> {
        if !self.is_in_progress() {
            warn!("Finish requested on a finished game");
            return Err(MoveError::GameOver);
        }
        info!(%outcome, "Game finished");
        self.status = GameStatus::Finished(outcome);
        Ok(())
    }
}
