//! Errors reported to callers of the session layer.

use strictly_chain::MoveError;
use uuid::Uuid;

/// Session operation error.
///
/// `EmptyMove` and `ChainMismatch` are detected locally, before the oracle
/// is asked. The oracle variants carry its reason verbatim.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// Nothing left after normalization.
    #[display("Move is empty")]
    EmptyMove,

    /// The word does not continue the chain.
    #[display("Word must start with '{}'", expected.to_ascii_uppercase())]
    ChainMismatch {
        /// Letter the word has to start with.
        expected: char,
    },

    /// The oracle judged the word invalid.
    #[display("Word rejected: {}", reason)]
    RejectedWord {
        /// The oracle's stated reason.
        reason: String,
    },

    /// The oracle could not be asked. The move was not accepted.
    #[display("Validation service unavailable: {}", reason)]
    OracleUnavailable {
        /// What went wrong.
        reason: String,
    },

    /// The session is finished, or the result arrived for a turn that is over.
    #[display("Session is not accepting this operation")]
    InvalidState,

    /// The submitter is not the seat to move.
    #[display("It is not your turn")]
    WrongPlayer,

    /// There is no draw offer to answer.
    #[display("No draw offer is pending")]
    NoDrawOffer,

    /// No session is registered under this id.
    #[display("Session {} not found", _0)]
    SessionNotFound(Uuid),

    /// A rules invariant broke while applying a move.
    #[display("Internal error: {}", _0)]
    Internal(String),
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::EmptyMove => SessionError::EmptyMove,
            MoveError::ChainMismatch(expected) => SessionError::ChainMismatch { expected },
            MoveError::GameOver => SessionError::InvalidState,
            MoveError::WrongPlayer(_) => SessionError::WrongPlayer,
            MoveError::InvariantViolation(msg) => SessionError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_errors_map_to_session_errors() {
        assert_eq!(SessionError::from(MoveError::EmptyMove), SessionError::EmptyMove);
        assert_eq!(
            SessionError::from(MoveError::ChainMismatch('e')),
            SessionError::ChainMismatch { expected: 'e' }
        );
        assert_eq!(SessionError::from(MoveError::GameOver), SessionError::InvalidState);
    }

    #[test]
    fn test_chain_mismatch_names_letter() {
        let err = SessionError::ChainMismatch { expected: 'e' };
        assert_eq!(err.to_string(), "Word must start with 'E'");
    }
}
