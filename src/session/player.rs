//! Session participants.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Who is behind a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// A person at the keyboard.
    Human,
    /// The automated opponent.
    Bot,
}

/// A participant, fixed for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Unique id.
    id: Uuid,
    /// Display name.
    name: String,
    /// Informational rating; never updated here.
    rating: u32,
    /// Human or bot.
    kind: PlayerKind,
}

impl Player {
    /// Creates a player with a fresh id.
    pub fn new(name: impl Into<String>, rating: u32, kind: PlayerKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
            kind,
        }
    }

    /// A human player.
    pub fn human(name: impl Into<String>, rating: u32) -> Self {
        Self::new(name, rating, PlayerKind::Human)
    }

    /// A bot player.
    pub fn bot(name: impl Into<String>, rating: u32) -> Self {
        Self::new(name, rating, PlayerKind::Bot)
    }

    /// True when this seat is driven by the bot.
    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Bot
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.rating)
    }
}
