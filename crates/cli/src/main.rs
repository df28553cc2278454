mod render;

use std::fs::{self, OpenOptions};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{prelude::*, EnvFilter};

use strikle_core::{
    config::{self, AppConfig},
    engine::GameEngine,
    roster::Roster,
};

/// Session key standing in for the chat conversation of a hosted bot.
const LOCAL_SESSION_KEY: &str = "local";

/// Abandoned games are swept hourly to bound memory growth.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let roster = Roster::load(&config.roster_path)?;
    if roster.is_empty() {
        tracing::warn!("roster is empty; games cannot start until data is provided");
    }
    let engine = Arc::new(GameEngine::new(roster, config.max_attempts));

    let sweeper = Arc::clone(&engine);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        // The first tick fires immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            tracing::info!("sweeping abandoned sessions");
            sweeper.terminate();
        }
    });

    let json_output = std::env::args().any(|arg| arg == "--json");
    run_repl(&engine, json_output).await?;

    engine.terminate();
    Ok(())
}

async fn run_repl(engine: &GameEngine, json_output: bool) -> Result<()> {
    println!("Strikle — guess the player. Type 'help' for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "start" => match engine.start(LOCAL_SESSION_KEY) {
                Ok(started) => println!("{}", render::started(&started)),
                Err(err) => println!("{err}"),
            },
            "guess" => match engine.guess(LOCAL_SESSION_KEY, rest) {
                Ok(feedback) => println!("{}", render::feedback(&feedback, json_output)?),
                Err(err) => println!("{err}"),
            },
            "quit" => match engine.quit(LOCAL_SESSION_KEY) {
                Ok(()) => println!("Game abandoned. Use 'start' to play again."),
                Err(err) => println!("{err}"),
            },
            "help" => println!("{}", render::help()),
            "exit" => break,
            other => println!("unknown command '{other}', type 'help'"),
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("strikle.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
