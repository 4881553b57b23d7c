//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strictly_chain::GameMode;
use strictly_words::{
    BotDriver, Difficulty, GameSession, Judgement, OracleClient, OracleError, Player,
    RulesSettings, SessionHandle, WordOracle,
};

/// Word judge double with a fixed dictionary and scripted suggestions.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    words: HashSet<String>,
    suggestions: Mutex<VecDeque<String>>,
    validate_delay: Option<Duration>,
    validate_calls: AtomicUsize,
    suggest_calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn with_words(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Queues suggestions; once exhausted, `suggest` fails.
    pub fn suggesting(self, words: &[&str]) -> Self {
        *self.suggestions.lock().unwrap() = words.iter().map(|w| w.to_string()).collect();
        self
    }

    /// Makes every validation take `delay`.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.validate_delay = Some(delay);
        self
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn suggest_calls(&self) -> usize {
        self.suggest_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl WordOracle for ScriptedOracle {
    async fn validate(&self, word: &str, _previous: Option<&str>) -> Result<Judgement, OracleError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.validate_delay {
            tokio::time::sleep(delay).await;
        }
        if self.words.contains(word) {
            Ok(Judgement::valid(Some(format!("definition of {word}"))))
        } else {
            Ok(Judgement::invalid("Not in dictionary"))
        }
    }

    async fn suggest(
        &self,
        _required: char,
        _previous: Option<&str>,
        _difficulty: Difficulty,
    ) -> Result<String, OracleError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        self.suggestions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| OracleError::Transport("script exhausted".to_string()))
    }

    async fn analyze(&self, words: &[String]) -> Result<String, OracleError> {
        Ok(format!("recap of {}", words.join(" ")))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Rules with `secs` on every clock.
pub fn rules(secs: u32) -> RulesSettings {
    toml::from_str(&format!(
        "[time_control]\nblitz_secs = {secs}\nrapid_secs = {secs}\nclassical_secs = {secs}\nbot_secs = {secs}"
    ))
    .expect("rules should parse")
}

pub fn client(oracle: &Arc<ScriptedOracle>, timeout: Duration) -> OracleClient {
    OracleClient::new(oracle.clone(), timeout)
}

/// Two humans, blitz.
pub fn pvp(oracle: &Arc<ScriptedOracle>, secs: u32) -> SessionHandle {
    let session = GameSession::new(
        GameMode::Blitz,
        [Player::human("Ada", 1500), Player::human("Grace", 1600)],
        &rules(secs),
    );
    SessionHandle::new(session, client(oracle, Duration::from_secs(5)))
}

/// Human in seat one, bot in seat two.
pub fn vs_bot(oracle: &Arc<ScriptedOracle>, secs: u32) -> SessionHandle {
    let session = GameSession::new(
        GameMode::Bot,
        [Player::human("Ada", 1500), Player::bot("Gemini Grandmaster", 2850)],
        &rules(secs),
    );
    SessionHandle::new(session, client(oracle, Duration::from_secs(5)))
}

/// Bot that answers instantly.
pub fn instant_bot(accepts_draws: bool) -> BotDriver {
    BotDriver::new(
        Duration::ZERO..=Duration::ZERO,
        Difficulty::Hard,
        3,
        accepts_draws,
    )
}
