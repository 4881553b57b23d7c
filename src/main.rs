//! Strictly Words - terminal client
//!
//! Plays a timed word chain against the bot, or checks a config file.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_chain::{GameMode, Slot};
use strictly_words::{
    GameConfig, GameEvent, Player, SessionHandle, SessionRegistry, SessionRunner, SessionSummary,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const HUMAN: Slot = Slot::First;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_words=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            name,
            lexicon,
        } => play(config, mode, name, lexicon).await,
        Command::CheckConfig { config } => check_config(config),
    }
}

/// Validate a config file and print it back
#[instrument]
fn check_config(path: PathBuf) -> Result<()> {
    let config = GameConfig::from_file(&path)?;
    println!("{} is valid", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Play one game against the bot
#[instrument]
async fn play(path: PathBuf, mode: GameMode, name: String, lexicon: Option<PathBuf>) -> Result<()> {
    let mut config = GameConfig::load_or_default(&path)?;
    if let Some(lexicon) = lexicon {
        let oracle = config.oracle().clone().with_lexicon(lexicon);
        config = config.with_oracle(oracle);
    }

    let registry = SessionRegistry::new(config.oracle_client()?, config.rules().clone());
    let players = [Player::human(name, 1200), config.bot().player()];
    let handle = registry.create(mode, players).await;

    let mut runner = SessionRunner::new(
        handle.clone(),
        config.bot().driver()?,
        config.rules().tick_interval(),
    );
    let mut events = runner.subscribe();
    let runner_task = tokio::spawn(runner.run());

    print_status(&handle).await;
    println!("Commands: /resign /draw /hint /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_input(&handle, line.trim()).await {
                            break;
                        }
                    }
                    None => {
                        info!("Input closed, resigning");
                        if let Err(e) = handle.resign(HUMAN).await {
                            warn!(error = %e, "Resign failed");
                        }
                        break;
                    }
                }
            }
            event = events.recv() => {
                match event {
                    Some(GameEvent::Finished(outcome)) => {
                        println!("Game over: {}", outcome);
                        break;
                    }
                    Some(event) => print_event(&handle, event).await,
                    None => break,
                }
            }
        }
    }

    let outcome = runner_task.await?;
    info!(%outcome, "Game finished");

    let summary = SessionSummary::build(&handle).await?;
    println!("\n{}", summary);
    registry.remove(handle.id()).await?;
    Ok(())
}

/// Handle one line of input. Returns false when the player leaves.
async fn handle_input(handle: &SessionHandle, input: &str) -> bool {
    match input {
        "" => {}
        "/quit" | "/resign" => {
            if let Err(e) = handle.resign(HUMAN).await {
                warn!(error = %e, "Resign failed");
            }
            return false;
        }
        "/draw" => match handle.offer_draw(HUMAN).await {
            Ok(_) => println!("Draw offered."),
            Err(e) => println!("{}", e),
        },
        "/hint" => match handle.hint().await {
            Ok(word) => println!("Hint: {}", word),
            Err(e) => println!("{}", e),
        },
        word => match handle.submit_move(word, false).await {
            Ok(action) => {
                let definition = action.definition.as_deref().unwrap_or("");
                println!("{}  {}", action, definition);
                print_status(handle).await;
            }
            Err(e) => println!("{}", e),
        },
    }
    true
}

async fn print_event(handle: &SessionHandle, event: GameEvent) {
    match event {
        GameEvent::Tick { slot, remaining } => {
            if slot == HUMAN && (remaining <= 10 || remaining % 30 == 0) {
                println!("{}s left", remaining);
            }
        }
        GameEvent::BotThinking => println!("Opponent is thinking..."),
        GameEvent::BotMoved(action) => {
            println!("{}", action);
            print_status(handle).await;
        }
        GameEvent::BotStalled { attempts } => {
            println!("Opponent failed {} times, trying again shortly.", attempts);
        }
        GameEvent::DrawDeclined => println!("Draw declined."),
        GameEvent::Finished(outcome) => println!("Game over: {}", outcome),
    }
}

async fn print_status(handle: &SessionHandle) {
    let snapshot = handle.snapshot().await;
    let [mine, theirs] = snapshot.clocks;
    println!(
        "[{} {}s | {} {}s] score {} - {}",
        snapshot.players[0].name(),
        mine,
        snapshot.players[1].name(),
        theirs,
        snapshot.scores[0],
        snapshot.scores[1]
    );
    if snapshot.to_move == HUMAN {
        match snapshot.required_letter {
            Some(letter) => println!("Your word, starting with '{}':", letter.to_ascii_uppercase()),
            None => println!("Your opening word:"),
        }
    }
}
