//! Oracle request and response types.

use crate::llm_client::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};

/// Reason reported when the oracle cannot be reached.
pub const SERVICE_UNAVAILABLE: &str = "service unavailable";

/// Vocabulary tier requested from the oracle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Common short words.
    Easy,
    /// Standard dictionary words.
    Medium,
    /// Rare or long words.
    #[default]
    Hard,
}

impl Difficulty {
    /// Prompt fragment describing the tier.
    pub fn describe(self) -> &'static str {
        match self {
            Difficulty::Easy => "common, simple 3-4 letter English word",
            Difficulty::Medium => "standard 5-7 letter English dictionary word",
            Difficulty::Hard => "complex, rare, or long academic English word",
        }
    }

    /// Inclusive word-length range that fits the tier.
    pub fn length_range(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (3, 4),
            Difficulty::Medium => (5, 7),
            Difficulty::Hard => (8, usize::MAX),
        }
    }
}

/// Raw judgement as returned by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgement {
    /// Whether the word is legal.
    pub is_valid: bool,
    /// Short definition.
    #[serde(default)]
    pub definition: Option<String>,
    /// Why the word was refused.
    #[serde(default, alias = "error")]
    pub reason: Option<String>,
}

impl Judgement {
    /// A positive judgement.
    pub fn valid(definition: Option<String>) -> Self {
        Self {
            is_valid: true,
            definition,
            reason: None,
        }
    }

    /// A negative judgement with a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            definition: None,
            reason: Some(reason.into()),
        }
    }
}

/// What the session does with a submitted word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The word is legal.
    Accepted {
        /// Short definition, if the oracle gave one.
        definition: Option<String>,
    },
    /// The oracle refused the word.
    Rejected {
        /// Human-readable reason.
        reason: String,
    },
    /// The oracle could not be asked. Never treated as valid.
    Unavailable {
        /// Human-readable reason.
        reason: String,
    },
}

impl Verdict {
    /// The verdict used for every transport, parse or timeout failure.
    pub fn unavailable() -> Self {
        Verdict::Unavailable {
            reason: SERVICE_UNAVAILABLE.to_string(),
        }
    }

    /// True only for [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

impl From<Judgement> for Verdict {
    fn from(judgement: Judgement) -> Self {
        if judgement.is_valid {
            Verdict::Accepted {
                definition: judgement.definition,
            }
        } else {
            Verdict::Rejected {
                reason: judgement
                    .reason
                    .unwrap_or_else(|| "Not a valid word".to_string()),
            }
        }
    }
}

/// Failure talking to the oracle.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OracleError {
    /// The request could not be delivered or answered.
    #[display("Oracle transport failed: {}", _0)]
    Transport(String),

    /// The reply could not be understood.
    #[display("Oracle reply malformed: {}", _0)]
    Malformed(String),

    /// No reply within the deadline.
    #[display("Oracle timed out after {:?}", _0)]
    Timeout(Duration),
}

impl std::error::Error for OracleError {}

impl From<LlmError> for OracleError {
    fn from(err: LlmError) -> Self {
        OracleError::Transport(err.message)
    }
}
