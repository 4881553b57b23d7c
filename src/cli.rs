//! Command-line interface for strictly_words.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_chain::GameMode;

/// Strictly Words - timed word chain against an LLM-backed bot
#[derive(Parser, Debug)]
#[command(name = "strictly_words")]
#[command(about = "Timed word chain game with an oracle-judged bot opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the bot in the terminal
    Play {
        /// Path to the game config
        #[arg(short, long, default_value = "strictly_words.toml")]
        config: PathBuf,

        /// Time control (blitz, rapid, classical, bot)
        #[arg(short, long, default_value = "bot")]
        mode: GameMode,

        /// Your display name
        #[arg(short, long, default_value = "Player")]
        name: String,

        /// Judge words against a local word list instead of the LLM
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// Validate a config file and print the effective settings
    CheckConfig {
        /// Path to the game config
        #[arg(short, long, default_value = "strictly_words.toml")]
        config: PathBuf,
    },
}
