//! Strictly Words library - timed word chain sessions
//!
//! Two seats take turns playing words, each starting with the last letter of
//! the previous word, under per-player countdown clocks. Word legality is
//! decided by an external oracle (an LLM or a local word list); the rules
//! themselves live in the `strictly_chain` crate.
//!
//! # Architecture
//!
//! - **Oracle**: [`WordOracle`] implementations behind the [`OracleClient`]
//!   failure policy (timeouts, fallback words)
//! - **Session**: [`GameSession`] state machine, serialized through
//!   [`SessionHandle`] and owned by a [`SessionRegistry`]
//! - **Bot**: [`BotDriver`] plays the automated side through the same
//!   submission path as a human
//! - **Runner**: [`SessionRunner`] ticks clocks and schedules bot turns
//!
//! # Example
//!
//! ```no_run
//! use strictly_words::{GameConfig, Player, SessionRegistry, SessionRunner};
//! use strictly_chain::GameMode;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("strictly_words.toml")?;
//! let registry = SessionRegistry::new(config.oracle_client()?, config.rules().clone());
//!
//! let players = [Player::human("Ada", 1500), config.bot().player()];
//! let handle = registry.create(GameMode::Blitz, players).await;
//!
//! let runner = SessionRunner::new(
//!     handle.clone(),
//!     config.bot().driver()?,
//!     config.rules().tick_interval(),
//! );
//! tokio::spawn(runner.run());
//!
//! handle.submit_move("apple", false).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bot;
mod config;
mod llm_client;
mod oracle;
mod runner;
mod session;
mod summary;

// Crate-level exports - Configuration
pub use config::{BotSettings, ConfigError, GameConfig, OracleSettings, RulesSettings};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Word oracle
pub use oracle::{
    ANALYSIS_UNAVAILABLE, DEFAULT_OPENING_LETTER, Difficulty, FALLBACK_WORDS, GAME_NOT_STARTED,
    Judgement, LexiconOracle, LlmOracle, OracleClient, OracleError, SERVICE_UNAVAILABLE, Verdict,
    WordOracle, fallback_word,
};

// Crate-level exports - Sessions
pub use session::{
    GameSession, PendingMove, Player, PlayerKind, SessionError, SessionHandle, SessionRegistry,
    SessionSnapshot,
};

// Crate-level exports - Bot and scheduling
pub use bot::{BotDriver, BotTask, BotTurn};
pub use runner::{GameEvent, MIN_TICK_INTERVAL, SessionRunner};

// Crate-level exports - Summary
pub use summary::SessionSummary;
