//! Word normalization, the chain rule, and scoring.

use super::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Points awarded per letter unless configured otherwise.
pub const DEFAULT_POINTS_MULTIPLIER: u32 = 15;

/// A normalized candidate word: non-empty, ASCII letters only, lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Normalizes raw input into a word.
    ///
    /// Surrounding whitespace is trimmed, everything that is not an ASCII
    /// letter is dropped and the rest is lower-cased.
    #[instrument]
    pub fn parse(raw: &str) -> Result<Self, MoveError> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if normalized.is_empty() {
            return Err(MoveError::EmptyMove);
        }

        Ok(Self(normalized))
    }

    /// Returns the word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first letter.
    pub fn first_letter(&self) -> char {
        // Non-empty by construction.
        self.0.chars().next().unwrap_or('a')
    }

    /// Returns the last letter.
    pub fn last_letter(&self) -> char {
        self.0.chars().last().unwrap_or('a')
    }

    /// Returns the number of letters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the word has no letters, which `parse` never produces.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the word, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns the letter the next word has to start with, lower-cased.
///
/// `None` when there is no previous word (the opener is free).
pub fn required_letter(previous: Option<&str>) -> Option<char> {
    previous
        .and_then(|word| word.chars().rev().find(|c| c.is_alphabetic()))
        .map(|c| c.to_ascii_lowercase())
}

/// Chain rule: the candidate's first letter equals the previous word's last
/// letter, ignoring case. Always true for the opening move.
#[instrument]
pub fn starts_chain(candidate: &str, previous: Option<&str>) -> bool {
    let Some(required) = required_letter(previous) else {
        return true;
    };

    candidate
        .chars()
        .next()
        .is_some_and(|first| first.to_ascii_lowercase() == required)
}

/// Points for an accepted word: length times the multiplier.
pub fn points_for(word: &Word, multiplier: u32) -> u32 {
    u32::try_from(word.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let word = Word::parse("  APPLE \n").unwrap();
        assert_eq!(word.as_str(), "apple");
        assert_eq!(Word::parse("Don't!").unwrap().as_str(), "dont");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Word::parse(""), Err(MoveError::EmptyMove));
        assert_eq!(Word::parse("   "), Err(MoveError::EmptyMove));
        assert_eq!(Word::parse("123 !?"), Err(MoveError::EmptyMove));
    }

    #[test]
    fn test_first_and_last_letter() {
        let word = Word::parse("Elephant").unwrap();
        assert_eq!(word.first_letter(), 'e');
        assert_eq!(word.last_letter(), 't');
        assert_eq!(word.len(), 8);
    }

    #[test]
    fn test_opener_always_chains() {
        assert!(starts_chain("apple", None));
        assert!(starts_chain("zebra", None));
    }

    #[test]
    fn test_chain_is_case_insensitive() {
        assert!(starts_chain("ELEPHANT", Some("apple")));
        assert!(starts_chain("elephant", Some("APPLE")));
        assert!(!starts_chain("banana", Some("APPLE")));
    }

    #[test]
    fn test_required_letter() {
        assert_eq!(required_letter(None), None);
        assert_eq!(required_letter(Some("APPLE")), Some('e'));
        assert_eq!(required_letter(Some("quartz")), Some('z'));
    }

    #[test]
    fn test_points_scale_with_length() {
        let apple = Word::parse("apple").unwrap();
        let elephant = Word::parse("elephant").unwrap();
        assert_eq!(points_for(&apple, DEFAULT_POINTS_MULTIPLIER), 75);
        assert_eq!(points_for(&elephant, 10), 80);
    }
}
