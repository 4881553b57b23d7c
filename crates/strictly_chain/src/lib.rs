//! Pure word-chain game logic.
//!
//! Everything here is synchronous and free of I/O: word normalization, the
//! chain rule, scoring, per-player clocks and the [`ChainGame`] state machine
//! that ties them together. Semantic word legality lives outside this crate;
//! [`ChainGame::apply`] is only called once an external judge has accepted a word.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod clock;
mod contracts;
mod game;
mod types;
mod word;

pub mod invariants;

pub use action::{Move, MoveError};
pub use clock::{Clock, ClockTick, Clocks};
pub use contracts::{Contract, MoveContract};
pub use game::{ChainGame, TickOutcome};
pub use types::{FinishReason, GameMode, GameStatus, Outcome, Slot, TimeControl};
pub use word::{DEFAULT_POINTS_MULTIPLIER, Word, points_for, required_letter, starts_chain};
