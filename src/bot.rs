//! Automated opponent.

use crate::oracle::{DEFAULT_OPENING_LETTER, Difficulty, fallback_word};
use crate::session::{SessionError, SessionHandle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strictly_chain::{Move, Outcome, Slot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// How a bot turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotTurn {
    /// The bot's word was accepted.
    Played(Move),
    /// Every attempt this turn was refused. The scheduler tries again later.
    Stalled {
        /// Submissions made.
        attempts: u32,
    },
    /// The session finished or the turn passed while the bot was thinking.
    Abandoned,
    /// It was not the bot's turn.
    NotBotTurn,
}

/// Plays the bot's side through the same submission path a human uses.
#[derive(Debug, Clone)]
pub struct BotDriver {
    delay: RangeInclusive<Duration>,
    difficulty: Difficulty,
    max_attempts: u32,
    accepts_draws: bool,
    rng: Arc<Mutex<StdRng>>,
}

impl BotDriver {
    /// Creates a driver that thinks for a random time within `delay`.
    #[instrument]
    pub fn new(
        delay: RangeInclusive<Duration>,
        difficulty: Difficulty,
        max_attempts: u32,
        accepts_draws: bool,
    ) -> Self {
        Self {
            delay,
            difficulty,
            max_attempts: max_attempts.max(1),
            accepts_draws,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    /// Makes the thinking delays reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Vocabulary tier the bot asks for.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Submissions per turn.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether the bot takes draw offers.
    pub fn accepts_draws(&self) -> bool {
        self.accepts_draws
    }

    /// Picks the next thinking delay.
    pub fn thinking_delay(&self) -> Duration {
        let min = u64::try_from(self.delay.start().as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.delay.end().as_millis()).unwrap_or(u64::MAX);
        if min >= max {
            return *self.delay.start();
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Duration::from_millis(rng.random_range(min..=max))
    }

    /// Plays one turn: think, ask for a word, submit it.
    ///
    /// A refused word is followed by the fallback word for the required
    /// letter, unless that exact word was already refused, in which case the
    /// oracle is asked again. After `max_attempts` refusals the turn ends as
    /// [`BotTurn::Stalled`].
    #[instrument(skip(self, handle), fields(session_id = %handle.id()))]
    pub async fn take_turn(&self, handle: &SessionHandle) -> BotTurn {
        if !handle.is_bot_turn().await {
            debug!("Not the bot's turn");
            return BotTurn::NotBotTurn;
        }

        let delay = self.thinking_delay();
        debug!(
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Bot thinking"
        );
        tokio::time::sleep(delay).await;

        let snapshot = handle.snapshot().await;
        if !snapshot.status.is_in_progress() {
            return BotTurn::Abandoned;
        }
        let previous = snapshot.moves.last().map(|m| m.word.as_str().to_string());
        let required = snapshot.required_letter.unwrap_or(DEFAULT_OPENING_LETTER);

        let mut candidate = handle
            .oracle()
            .suggest_move(previous.as_deref(), self.difficulty)
            .await;
        let mut refused: Vec<String> = Vec::new();

        for attempt in 1..=self.max_attempts {
            match handle.submit_move(&candidate, true).await {
                Ok(action) => {
                    info!(word = %action.word, attempt, "Bot played");
                    return BotTurn::Played(action);
                }
                Err(SessionError::InvalidState | SessionError::WrongPlayer) => {
                    debug!("Turn ended while the bot was moving");
                    return BotTurn::Abandoned;
                }
                Err(e) => {
                    warn!(word = %candidate, attempt, error = %e, "Bot move refused");
                    refused.push(candidate);
                    if attempt == self.max_attempts {
                        break;
                    }

                    let fallback = fallback_word(required);
                    candidate = if refused.iter().any(|w| w == fallback) {
                        handle
                            .oracle()
                            .suggest_move(previous.as_deref(), self.difficulty)
                            .await
                    } else {
                        fallback.to_string()
                    };
                }
            }
        }

        warn!(attempts = self.max_attempts, "Bot stalled this turn");
        BotTurn::Stalled {
            attempts: self.max_attempts,
        }
    }

    /// Runs [`BotDriver::take_turn`] in the background.
    #[instrument(skip(self, handle), fields(session_id = %handle.id()))]
    pub fn spawn_turn(&self, handle: SessionHandle) -> BotTask {
        let driver = self.clone();
        let join = tokio::spawn(async move { driver.take_turn(&handle).await });
        BotTask { join: Some(join) }
    }

    /// Answers a draw offer made to `bot`.
    #[instrument(skip(self, handle), fields(session_id = %handle.id()))]
    pub async fn answer_draw(
        &self,
        handle: &SessionHandle,
        bot: Slot,
    ) -> Result<Option<Outcome>, SessionError> {
        if self.accepts_draws {
            info!("Bot accepts the draw");
            handle.accept_draw(bot).await.map(Some)
        } else {
            info!("Bot declines the draw");
            handle.decline_draw(bot).await.map(|_| None)
        }
    }
}

/// A pending bot turn. Dropping it cancels the turn.
#[derive(Debug)]
pub struct BotTask {
    join: Option<JoinHandle<BotTurn>>,
}

impl BotTask {
    /// True once the turn has completed or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancels the turn.
    pub fn abort(&self) {
        if let Some(join) = &self.join {
            join.abort();
        }
    }

    /// Waits for the turn. `None` if it was cancelled.
    pub async fn join(mut self) -> Option<BotTurn> {
        let join = self.join.take()?;
        join.await.ok()
    }
}

impl Drop for BotTask {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> BotDriver {
        BotDriver::new(
            Duration::from_millis(1000)..=Duration::from_millis(2500),
            Difficulty::Hard,
            3,
            true,
        )
    }

    #[test]
    fn test_delay_stays_in_window() {
        let driver = driver().with_seed(42);
        for _ in 0..100 {
            let delay = driver.thinking_delay();
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(2500));
        }
    }

    #[test]
    fn test_seeded_delays_repeat() {
        let a = driver().with_seed(7);
        let b = driver().with_seed(7);
        let first: Vec<_> = (0..5).map(|_| a.thinking_delay()).collect();
        let second: Vec<_> = (0..5).map(|_| b.thinking_delay()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_huge_window_keeps_lower_bound() {
        let driver = BotDriver::new(
            Duration::from_millis(1000)..=Duration::from_secs(u64::MAX),
            Difficulty::Medium,
            3,
            true,
        )
        .with_seed(3);
        for _ in 0..20 {
            assert!(driver.thinking_delay() >= Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_fixed_window_and_attempt_floor() {
        let driver = BotDriver::new(
            Duration::ZERO..=Duration::ZERO,
            Difficulty::Easy,
            0,
            false,
        );
        assert_eq!(driver.thinking_delay(), Duration::ZERO);
        assert_eq!(driver.max_attempts(), 1);
        assert!(!driver.accepts_draws());
    }
}
