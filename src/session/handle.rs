//! Shared, serialized access to one session.

use super::{GameSession, SessionError, SessionSnapshot};
use crate::oracle::OracleClient;
use std::sync::Arc;
use strictly_chain::{Move, Outcome, Slot, TickOutcome};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Cloneable handle to a running session.
///
/// The mutex is the single serialization point for moves, ticks and reads.
/// It is never held across the oracle call, so the clock keeps running
/// while a word is being judged.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: Uuid,
    session: Arc<Mutex<GameSession>>,
    oracle: OracleClient,
}

impl SessionHandle {
    /// Wraps a session together with the oracle that judges its moves.
    #[instrument(skip_all, fields(session_id = %session.id()))]
    pub fn new(session: GameSession, oracle: OracleClient) -> Self {
        Self {
            id: session.id(),
            session: Arc::new(Mutex::new(session)),
            oracle,
        }
    }

    /// Session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The oracle client used by this session.
    pub fn oracle(&self) -> &OracleClient {
        &self.oracle
    }

    /// Submits a word for the seat to move.
    ///
    /// Local checks run under the lock. The oracle is then asked exactly once
    /// with the lock released, and the verdict is committed under the lock
    /// again. If the session finished or the turn moved on in the meantime,
    /// the verdict is discarded with `InvalidState`.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn submit_move(&self, raw: &str, is_bot: bool) -> Result<Move, SessionError> {
        let pending = self.session.lock().await.prepare_move(raw, is_bot)?;

        let verdict = self
            .oracle
            .validate(pending.word(), pending.previous())
            .await;
        debug!(?verdict, "Verdict received");

        self.session.lock().await.commit_move(pending, verdict)
    }

    /// `slot` resigns.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn resign(&self, slot: Slot) -> Result<Outcome, SessionError> {
        self.session.lock().await.resign(slot)
    }

    /// `slot` offers a draw. Returns the outcome if the offers crossed.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn offer_draw(&self, slot: Slot) -> Result<Option<Outcome>, SessionError> {
        self.session.lock().await.offer_draw(slot)
    }

    /// `slot` accepts the pending offer.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn accept_draw(&self, slot: Slot) -> Result<Outcome, SessionError> {
        self.session.lock().await.accept_draw(slot)
    }

    /// `slot` declines the pending offer.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn decline_draw(&self, slot: Slot) -> Result<(), SessionError> {
        self.session.lock().await.decline_draw(slot)
    }

    /// Ends the game from outside.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn adjudicate(&self, outcome: Outcome) -> Result<Outcome, SessionError> {
        self.session.lock().await.adjudicate(outcome)
    }

    /// Advances the running clock by one unit.
    pub async fn tick(&self) -> TickOutcome {
        self.session.lock().await.tick()
    }

    /// Freezes both clocks.
    pub async fn pause(&self) -> Result<(), SessionError> {
        self.session.lock().await.pause()
    }

    /// Restarts the running clock.
    pub async fn resume(&self) -> Result<(), SessionError> {
        self.session.lock().await.resume()
    }

    /// Current state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// True while the game is live.
    pub async fn is_in_progress(&self) -> bool {
        self.session.lock().await.is_in_progress()
    }

    /// True when the bot should move now.
    pub async fn is_bot_turn(&self) -> bool {
        self.session.lock().await.is_bot_turn()
    }

    /// Outcome once finished.
    pub async fn outcome(&self) -> Option<Outcome> {
        self.session.lock().await.outcome()
    }

    /// Suggests a word for the seat to move. Never changes state.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn hint(&self) -> Result<String, SessionError> {
        let previous = {
            let session = self.session.lock().await;
            if !session.is_in_progress() {
                return Err(SessionError::InvalidState);
            }
            session.game().last_word().map(|w| w.as_str().to_string())
        };
        Ok(self.oracle.hint(previous.as_deref()).await)
    }
}
