//! The authoritative state of one match.

use super::{Player, SessionError};
use crate::config::RulesSettings;
use crate::oracle::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strictly_chain::{
    ChainGame, FinishReason, GameMode, GameStatus, Move, Outcome, Slot, TickOutcome, Word,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A locally checked move waiting for the oracle's verdict.
///
/// Carries the turn it was prepared for; a verdict that comes back after
/// that turn is over is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    slot: Slot,
    word: Word,
    previous: Option<Word>,
    turn: usize,
}

impl PendingMove {
    /// Seat that submitted the word.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// The normalized word.
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// The word it has to follow, if any.
    pub fn previous(&self) -> Option<&Word> {
        self.previous.as_ref()
    }
}

/// Read model handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session id.
    pub id: Uuid,
    /// Time-control variant.
    pub mode: GameMode,
    /// Both participants, in seat order.
    pub players: [Player; 2],
    /// Accepted moves, oldest first.
    pub moves: Vec<Move>,
    /// Seat to move.
    pub to_move: Slot,
    /// Remaining seconds per seat.
    pub clocks: [u32; 2],
    /// Whether the clocks are frozen.
    pub paused: bool,
    /// Lifecycle status, with the outcome once finished.
    pub status: GameStatus,
    /// Points per seat.
    pub scores: [u32; 2],
    /// Seat with an open draw offer.
    pub draw_offer: Option<Slot>,
    /// Letter the next word must start with.
    pub required_letter: Option<char>,
}

impl SessionSnapshot {
    /// The player whose turn it is.
    pub fn active_player(&self) -> &Player {
        &self.players[self.to_move.index()]
    }

    /// The winning player, if the game ended decisively.
    pub fn winner(&self) -> Option<&Player> {
        self.status
            .outcome()
            .and_then(|o| o.winner())
            .map(|slot| &self.players[slot.index()])
    }
}

/// One match between two seats.
///
/// Every operation here is synchronous and oracle-free. The word judge is
/// consulted between [`GameSession::prepare_move`] and
/// [`GameSession::commit_move`], outside any lock the caller holds.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    mode: GameMode,
    players: [Player; 2],
    game: ChainGame,
    draw_offer: Option<Slot>,
    created_at: DateTime<Utc>,
}

impl GameSession {
    /// Starts a session with both clocks set from the mode's time control.
    #[instrument(skip(players, rules), fields(first = %players[0], second = %players[1]))]
    pub fn new(mode: GameMode, players: [Player; 2], rules: &RulesSettings) -> Self {
        let id = Uuid::new_v4();
        let initial = rules.time_control().initial_secs(mode);
        info!(session_id = %id, %mode, initial, "Creating game session");
        Self {
            id,
            mode,
            players,
            game: ChainGame::new(initial, *rules.multiplier()),
            draw_offer: None,
            created_at: Utc::now(),
        }
    }

    /// Session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Time-control variant.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// When the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Both participants, in seat order.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// The participant in `slot`.
    pub fn player(&self, slot: Slot) -> &Player {
        &self.players[slot.index()]
    }

    /// The underlying rules state.
    pub fn game(&self) -> &ChainGame {
        &self.game
    }

    /// True until the session reaches a terminal state.
    pub fn is_in_progress(&self) -> bool {
        self.game.is_in_progress()
    }

    /// The outcome once finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.game.status().outcome()
    }

    /// Seat with an open draw offer.
    pub fn draw_offer(&self) -> Option<Slot> {
        self.draw_offer
    }

    /// True when the bot is the seat to move in a live game.
    pub fn is_bot_turn(&self) -> bool {
        self.is_in_progress() && self.player(self.game.to_move()).is_bot()
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.is_in_progress() {
            Ok(())
        } else {
            warn!(session_id = %self.id, "Operation on finished session");
            Err(SessionError::InvalidState)
        }
    }

    /// Runs the local checks for a submission and captures the turn.
    ///
    /// Order: session state, submitter, normalization, chain rule. Nothing
    /// is mutated and the oracle is not involved.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn prepare_move(&self, raw: &str, is_bot: bool) -> Result<PendingMove, SessionError> {
        self.ensure_in_progress()?;

        let slot = self.game.to_move();
        if self.player(slot).is_bot() != is_bot {
            warn!(?slot, is_bot, "Submission from the wrong side");
            return Err(SessionError::WrongPlayer);
        }

        let word = self.game.check_candidate(raw)?;
        debug!(word = %word, ?slot, "Move passed local checks");

        Ok(PendingMove {
            slot,
            word,
            previous: self.game.last_word().cloned(),
            turn: self.game.moves().len(),
        })
    }

    /// Applies the oracle's verdict to a prepared move.
    ///
    /// Only [`Verdict::Accepted`] mutates state. A verdict for a finished
    /// session or a turn that already passed is dropped as `InvalidState`.
    #[instrument(skip(self, pending), fields(session_id = %self.id, word = %pending.word))]
    pub fn commit_move(
        &mut self,
        pending: PendingMove,
        verdict: Verdict,
    ) -> Result<Move, SessionError> {
        self.ensure_in_progress()?;

        if pending.turn != self.game.moves().len() || pending.slot != self.game.to_move() {
            warn!(
                prepared_for = pending.turn,
                current = self.game.moves().len(),
                "Dropping stale verdict"
            );
            return Err(SessionError::InvalidState);
        }

        match verdict {
            Verdict::Accepted { definition } => {
                let action = self.game.apply(pending.word, definition, Utc::now())?;
                if self.draw_offer == Some(action.slot.opponent()) {
                    debug!(slot = ?action.slot, "Move declines the pending draw offer");
                    self.draw_offer = None;
                }
                info!(word = %action.word, points = action.points, "Move accepted");
                Ok(action)
            }
            Verdict::Rejected { reason } => {
                info!(reason = %reason, "Oracle rejected word");
                Err(SessionError::RejectedWord { reason })
            }
            Verdict::Unavailable { reason } => {
                warn!(reason = %reason, "Oracle unavailable, move not accepted");
                Err(SessionError::OracleUnavailable { reason })
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Result<Outcome, SessionError> {
        self.game.finish(outcome)?;
        self.draw_offer = None;
        info!(session_id = %self.id, %outcome, "Session finished");
        Ok(outcome)
    }

    /// `slot` resigns; the other seat wins.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn resign(&mut self, slot: Slot) -> Result<Outcome, SessionError> {
        self.ensure_in_progress()?;
        self.finish(Outcome::Winner {
            slot: slot.opponent(),
            reason: FinishReason::Resignation,
        })
    }

    /// `slot` proposes a draw.
    ///
    /// If the other seat already has an offer open, the two offers meet and
    /// the game ends drawn.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn offer_draw(&mut self, slot: Slot) -> Result<Option<Outcome>, SessionError> {
        self.ensure_in_progress()?;

        if self.draw_offer == Some(slot.opponent()) {
            return self.accept_draw(slot).map(Some);
        }

        info!(?slot, "Draw offered");
        self.draw_offer = Some(slot);
        Ok(None)
    }

    /// `slot` accepts the other seat's offer.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn accept_draw(&mut self, slot: Slot) -> Result<Outcome, SessionError> {
        self.ensure_in_progress()?;
        if self.draw_offer != Some(slot.opponent()) {
            return Err(SessionError::NoDrawOffer);
        }
        self.finish(Outcome::Draw)
    }

    /// `slot` turns the other seat's offer down.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn decline_draw(&mut self, slot: Slot) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if self.draw_offer != Some(slot.opponent()) {
            return Err(SessionError::NoDrawOffer);
        }
        info!(?slot, "Draw declined");
        self.draw_offer = None;
        Ok(())
    }

    /// Ends the game from outside with the given outcome.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn adjudicate(&mut self, outcome: Outcome) -> Result<Outcome, SessionError> {
        self.ensure_in_progress()?;
        self.finish(outcome)
    }

    /// Advances the running clock by one unit.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.game.tick();
        if let TickOutcome::Expired(result) = outcome {
            info!(session_id = %self.id, %result, "Session finished on time");
            self.draw_offer = None;
        }
        outcome
    }

    /// Freezes both clocks.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn pause(&mut self) -> Result<(), SessionError> {
        Ok(self.game.pause()?)
    }

    /// Restarts the running clock.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn resume(&mut self) -> Result<(), SessionError> {
        Ok(self.game.resume()?)
    }

    /// Current state for display.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            mode: self.mode,
            players: self.players.clone(),
            moves: self.game.moves().to_vec(),
            to_move: self.game.to_move(),
            clocks: self.game.clocks().remaining(),
            paused: self.game.is_paused(),
            status: self.game.status(),
            scores: self.game.scores(),
            draw_offer: self.draw_offer,
            required_letter: self.game.required_letter(),
        }
    }
}
