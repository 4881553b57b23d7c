//! Post-game summary.

use crate::session::{Player, SessionError, SessionHandle, SessionSnapshot};
use serde::{Deserialize, Serialize};
use strictly_chain::{Move, Outcome};
use tracing::{info, instrument};

/// Result of a finished session plus the oracle's recap.
///
/// The recap is informational; it never changes the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// How the game ended.
    pub outcome: Outcome,
    /// Both participants, in seat order.
    pub players: [Player; 2],
    /// Points per seat.
    pub scores: [u32; 2],
    /// Every accepted move, oldest first.
    pub moves: Vec<Move>,
    /// Free-text recap.
    pub analysis: String,
}

impl SessionSummary {
    /// Builds the summary of a finished session.
    ///
    /// Returns `InvalidState` while the session is still running.
    #[instrument(skip(handle), fields(session_id = %handle.id()))]
    pub async fn build(handle: &SessionHandle) -> Result<Self, SessionError> {
        let snapshot = handle.snapshot().await;
        let outcome = snapshot
            .status
            .outcome()
            .ok_or(SessionError::InvalidState)?;

        let words = move_words(&snapshot);
        let analysis = handle.oracle().analyze(&words).await;
        info!(%outcome, moves = words.len(), "Summary built");

        Ok(Self {
            outcome,
            players: snapshot.players,
            scores: snapshot.scores,
            moves: snapshot.moves,
            analysis,
        })
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<&Player> {
        self.outcome
            .winner()
            .map(|slot| &self.players[slot.index()])
    }
}

fn move_words(snapshot: &SessionSnapshot) -> Vec<String> {
    snapshot
        .moves
        .iter()
        .map(|m| m.word.as_str().to_string())
        .collect()
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner() {
            Some(player) => writeln!(f, "Result: {} ({})", player.name(), self.outcome)?,
            None => writeln!(f, "Result: {}", self.outcome)?,
        }
        writeln!(
            f,
            "Score: {} {} - {} {}",
            self.players[0].name(),
            self.scores[0],
            self.scores[1],
            self.players[1].name()
        )?;
        writeln!(f, "Moves: {}", self.moves.len())?;
        write!(f, "{}", self.analysis)
    }
}
