//! Offline oracle backed by a word list.

use super::{Difficulty, Judgement, OracleError, WordOracle};
use crate::config::ConfigError;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::path::Path;
use strictly_chain::{Word, starts_chain};
use tracing::{debug, info, instrument};

/// [`WordOracle`] that judges against a fixed set of words.
///
/// Useful without network access and as a deterministic judge in tests.
/// Entries are normalized the same way player input is.
#[derive(Debug, Clone)]
pub struct LexiconOracle {
    words: HashSet<String>,
}

impl LexiconOracle {
    /// Builds a lexicon from any list of words. Entries that normalize to
    /// nothing are skipped.
    #[instrument(skip(words))]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .filter_map(|raw| Word::parse(raw.as_ref()).ok())
            .map(Word::into_string)
            .collect();
        debug!(entries = words.len(), "Lexicon built");
        Self { words }
    }

    /// Loads a newline-separated word list. Lines starting with `#` are ignored.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read lexicon: {}", e)))?;

        let lexicon = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );

        if lexicon.is_empty() {
            return Err(ConfigError::new("Lexicon contains no words".to_string()));
        }

        info!(entries = lexicon.len(), "Lexicon loaded");
        Ok(lexicon)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the lexicon has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True when the normalized word is listed.
    pub fn contains(&self, word: &str) -> bool {
        Word::parse(word).is_ok_and(|word| self.words.contains(word.as_str()))
    }

    fn pick(&self, required: char, difficulty: Difficulty) -> Option<String> {
        let (min, max) = difficulty.length_range();
        let mut starting: Vec<&String> = self
            .words
            .iter()
            .filter(|w| w.starts_with(required))
            .collect();
        // HashSet order varies between runs.
        starting.sort();

        let fitting: Vec<&String> = starting
            .iter()
            .copied()
            .filter(|w| (min..=max).contains(&w.len()))
            .collect();

        let pool = if fitting.is_empty() { starting } else { fitting };
        let mut rng = rand::rng();
        pool.choose(&mut rng).map(|w| (*w).clone())
    }
}

#[async_trait::async_trait]
impl WordOracle for LexiconOracle {
    #[instrument(skip(self))]
    async fn validate(&self, word: &str, previous: Option<&str>) -> Result<Judgement, OracleError> {
        if !starts_chain(word, previous) {
            return Ok(Judgement::invalid("Word does not continue the chain"));
        }

        if self.contains(word) {
            Ok(Judgement::valid(None))
        } else {
            Ok(Judgement::invalid(format!("\"{}\" is not in the lexicon", word)))
        }
    }

    #[instrument(skip(self))]
    async fn suggest(
        &self,
        required: char,
        _previous: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<String, OracleError> {
        self.pick(required.to_ascii_lowercase(), difficulty)
            .ok_or_else(|| OracleError::Malformed(format!("no lexicon word starts with '{required}'")))
    }

    #[instrument(skip(self, words), fields(moves = words.len()))]
    async fn analyze(&self, words: &[String]) -> Result<String, OracleError> {
        let longest = words
            .iter()
            .max_by_key(|w| w.len())
            .map(String::as_str)
            .unwrap_or("");
        let letters: usize = words.iter().map(String::len).sum();

        Ok(format!(
            "{} words played for {} letters in total. Longest word: \"{}\".",
            words.len(),
            letters,
            longest
        ))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
