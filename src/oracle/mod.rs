//! Word Oracle boundary.
//!
//! The oracle is the outside authority on word legality. It also proposes
//! moves for the bot and writes post-game recaps. [`WordOracle`] is the raw
//! seam; [`OracleClient`] wraps it with the failure policy the session relies
//! on (timeouts, "never valid on failure", fallback words).

mod client;
mod fallback;
mod lexicon;
mod llm;
mod verdict;

pub use client::{ANALYSIS_UNAVAILABLE, GAME_NOT_STARTED, OracleClient};
pub use fallback::{DEFAULT_OPENING_LETTER, FALLBACK_WORDS, fallback_word};
pub use lexicon::LexiconOracle;
pub use llm::LlmOracle;
pub use verdict::{Difficulty, Judgement, OracleError, SERVICE_UNAVAILABLE, Verdict};

/// Raw request/response contract with an external word judge.
///
/// Implementations may fail at any time; they never touch session state.
#[async_trait::async_trait]
pub trait WordOracle: std::fmt::Debug + Send + Sync {
    /// Judges `word`, given the previous word as context.
    async fn validate(&self, word: &str, previous: Option<&str>) -> Result<Judgement, OracleError>;

    /// Proposes one word starting with `required` at the given difficulty.
    async fn suggest(
        &self,
        required: char,
        previous: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<String, OracleError>;

    /// Writes a free-text recap of a finished game.
    async fn analyze(&self, words: &[String]) -> Result<String, OracleError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
