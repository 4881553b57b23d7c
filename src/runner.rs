//! Drives a session in real time: clock ticks, bot turns and draw replies.

use crate::bot::{BotDriver, BotTask, BotTurn};
use crate::session::SessionHandle;
use std::time::Duration;
use strictly_chain::{Move, Outcome, Slot, TickOutcome};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Something that happened while a session was running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The running clock moved.
    Tick {
        /// Seat whose clock ran.
        slot: Slot,
        /// Seconds left.
        remaining: u32,
    },
    /// The bot started thinking.
    BotThinking,
    /// The bot's word was accepted.
    BotMoved(Move),
    /// The bot could not get a word accepted this pass.
    BotStalled {
        /// Submissions made.
        attempts: u32,
    },
    /// The bot turned a draw offer down.
    DrawDeclined,
    /// The session is over.
    Finished(Outcome),
}

/// Shortest cadence a runner ticks at.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Scheduler for one session.
///
/// Each interval it ticks the clock, starts a bot turn when the bot is to
/// move and answers draw offers made to the bot. It owns at most one bot
/// task, which is cancelled when the session finishes.
#[derive(Debug)]
pub struct SessionRunner {
    handle: SessionHandle,
    driver: BotDriver,
    interval: Duration,
    events: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl SessionRunner {
    /// Creates a runner ticking once per `interval`.
    ///
    /// A zero interval is raised to [`MIN_TICK_INTERVAL`].
    #[instrument(skip(handle, driver), fields(session_id = %handle.id()))]
    pub fn new(handle: SessionHandle, driver: BotDriver, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("Zero tick interval, using the minimum");
            MIN_TICK_INTERVAL
        } else {
            interval
        };
        Self {
            handle,
            driver,
            interval,
            events: None,
        }
    }

    /// Publishes events on `tx`.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Creates an event channel and returns its receiving end.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    fn emit(&self, event: GameEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }

    /// Runs until the session finishes and returns the outcome.
    #[instrument(skip(self), fields(session_id = %self.handle.id()))]
    pub async fn run(self) -> Outcome {
        info!(
            interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
            "Session runner started"
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        let mut bot_task: Option<BotTask> = None;

        loop {
            ticker.tick().await;

            if let Some(task) = bot_task.take() {
                if task.is_finished() {
                    self.report_bot_turn(task.join().await);
                } else {
                    bot_task = Some(task);
                }
            }

            if let Some(outcome) = self.handle.outcome().await {
                return self.finish(outcome, bot_task);
            }

            match self.handle.tick().await {
                TickOutcome::Running { slot, remaining } => {
                    self.emit(GameEvent::Tick { slot, remaining });
                }
                TickOutcome::Expired(outcome) => return self.finish(outcome, bot_task),
                TickOutcome::Idle => {}
            }

            let snapshot = self.handle.snapshot().await;
            if let Some(offerer) = snapshot.draw_offer {
                let recipient = offerer.opponent();
                if snapshot.players[recipient.index()].is_bot() {
                    match self.driver.answer_draw(&self.handle, recipient).await {
                        Ok(Some(outcome)) => return self.finish(outcome, bot_task),
                        Ok(None) => self.emit(GameEvent::DrawDeclined),
                        Err(e) => warn!(error = %e, "Bot could not answer draw"),
                    }
                }
            }

            if bot_task.is_none() && self.handle.is_bot_turn().await {
                self.emit(GameEvent::BotThinking);
                bot_task = Some(self.driver.spawn_turn(self.handle.clone()));
            }
        }
    }

    fn report_bot_turn(&self, turn: Option<BotTurn>) {
        match turn {
            Some(BotTurn::Played(action)) => self.emit(GameEvent::BotMoved(action)),
            Some(BotTurn::Stalled { attempts }) => {
                self.emit(GameEvent::BotStalled { attempts });
            }
            Some(BotTurn::Abandoned | BotTurn::NotBotTurn) => {}
            None => warn!("Bot task did not complete"),
        }
    }

    fn finish(&self, outcome: Outcome, bot_task: Option<BotTask>) -> Outcome {
        if let Some(task) = bot_task {
            debug!("Cancelling pending bot turn");
            task.abort();
        }
        info!(%outcome, "Session runner finished");
        self.emit(GameEvent::Finished(outcome));
        outcome
    }
}
