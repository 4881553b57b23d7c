//! Failure-policy facade over a [`WordOracle`].

use super::{
    DEFAULT_OPENING_LETTER, Difficulty, OracleError, Verdict, WordOracle, fallback_word,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use strictly_chain::{Word, required_letter};
use tracing::{debug, info, instrument, warn};

/// Recap returned when the analysis call fails.
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable.";

/// Recap returned for a game without moves.
pub const GAME_NOT_STARTED: &str = "The game has not started yet.";

/// Stateless oracle client, cheap to clone and safe to share across sessions.
///
/// Every call is bounded by a timeout. Failures never cross this boundary as
/// errors: validation degrades to [`Verdict::Unavailable`], suggestions to
/// the fallback table and analysis to a fixed message.
#[derive(Debug, Clone)]
pub struct OracleClient {
    oracle: Arc<dyn WordOracle>,
    timeout: Duration,
}

impl OracleClient {
    /// Wraps an oracle with a per-call timeout.
    #[instrument(skip(oracle), fields(oracle = oracle.name()))]
    pub fn new(oracle: Arc<dyn WordOracle>, timeout: Duration) -> Self {
        info!("Creating oracle client");
        Self { oracle, timeout }
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, OracleError>>,
    ) -> Result<T, OracleError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout(self.timeout)),
        }
    }

    /// Judges a normalized word. Called at most once per submitted move.
    #[instrument(skip(self), fields(oracle = self.oracle.name()))]
    pub async fn validate(&self, word: &Word, previous: Option<&Word>) -> Verdict {
        let call = self
            .oracle
            .validate(word.as_str(), previous.map(Word::as_str));

        match self.bounded(call).await {
            Ok(judgement) => {
                let verdict = Verdict::from(judgement);
                debug!(?verdict, "Oracle judged word");
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Word validation failed");
                Verdict::unavailable()
            }
        }
    }

    /// Proposes the next word after `previous`.
    ///
    /// The result always starts with the required letter: anything the
    /// oracle returns that does not, and any failure, is replaced by the
    /// fallback word for that letter.
    #[instrument(skip(self), fields(oracle = self.oracle.name()))]
    pub async fn suggest_move(&self, previous: Option<&str>, difficulty: Difficulty) -> String {
        let required = required_letter(previous).unwrap_or(DEFAULT_OPENING_LETTER);
        let call = self.oracle.suggest(required, previous, difficulty);

        match self.bounded(call).await {
            Ok(raw) => match Word::parse(&raw) {
                Ok(word) if word.first_letter() == required => {
                    debug!(word = %word, "Oracle suggestion accepted");
                    word.into_string()
                }
                _ => {
                    warn!(raw = %raw, required = %required, "Suggestion breaks the chain, using fallback");
                    fallback_word(required).to_string()
                }
            },
            Err(e) => {
                warn!(error = %e, required = %required, "Suggestion failed, using fallback");
                fallback_word(required).to_string()
            }
        }
    }

    /// Suggests a strong word for the player to move. Informational only.
    #[instrument(skip(self))]
    pub async fn hint(&self, previous: Option<&str>) -> String {
        self.suggest_move(previous, Difficulty::Hard).await
    }

    /// Writes a recap of the given move list. Best effort.
    #[instrument(skip(self, words), fields(moves = words.len()))]
    pub async fn analyze(&self, words: &[String]) -> String {
        if words.is_empty() {
            return GAME_NOT_STARTED.to_string();
        }

        match self.bounded(self.oracle.analyze(words)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}
