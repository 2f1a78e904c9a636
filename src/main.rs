//! Attendee Lottery - operator CLI
//!
//! Imports a roster, draws winners and manages the persisted winner history.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use attendee_lottery::{
    FileStore, LotteryConfig, LotteryDesk, LotterySession, RandomSource, SeededRandom,
    ThreadRandom, WinnerHistory,
};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

type Desk = LotteryDesk<FileStore, Box<dyn RandomSource + Send>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LotteryConfig::from_file(path)?,
        None => LotteryConfig::default(),
    };
    if let Some(dir) = cli.history_dir {
        config = config.with_history_dir(dir);
    }

    match cli.command {
        Command::Draw {
            roster,
            count,
            no_suspense,
            seed,
        } => run_draw(&config, &roster, count, no_suspense, seed).await,
        Command::Winners => run_winners(&config),
        Command::Reset => run_reset(&config),
        Command::Stats { roster } => run_stats(&config, &roster),
    }
}

/// Builds a desk over the configured history directory.
#[instrument(skip(config, rng))]
fn open_desk(config: &LotteryConfig, rng: Box<dyn RandomSource + Send>) -> Result<Desk> {
    let store = FileStore::open(config.history_dir())?;
    let history = WinnerHistory::open(store)?;
    let session = LotterySession::new(history, rng).with_rules(config.rules());
    Ok(LotteryDesk::new(session))
}

fn read_roster(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Imports the roster and draws up to `count` winners.
async fn run_draw(
    config: &LotteryConfig,
    roster: &Path,
    count: usize,
    no_suspense: bool,
    seed: Option<u64>,
) -> Result<()> {
    let rng: Box<dyn RandomSource + Send> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let desk = open_desk(config, rng)?;

    let summary = desk.import(&read_roster(roster)?)?;
    println!(
        "Loaded {} participants, {} eligible",
        summary.total(),
        summary.eligible()
    );

    for n in 1..=count {
        if desk.with_session(|s| s.pool().is_empty()) {
            warn!(drawn = n - 1, requested = count, "Eligible pool exhausted");
            println!("No eligible participants remain.");
            break;
        }

        let winner = if no_suspense {
            desk.draw()?
        } else {
            println!("Drawing...");
            desk.draw_with_suspense(config.suspense()).await?
        };
        println!("#{} {}", n, winner);
    }

    info!(state = %desk.state(), "Draw run finished");
    Ok(())
}

/// Prints recorded winners in draw order.
fn run_winners(config: &LotteryConfig) -> Result<()> {
    let desk = open_desk(config, Box::new(ThreadRandom))?;
    let winners = desk.winners();
    if winners.is_empty() {
        println!("No winners recorded.");
    }
    for (i, winner) in winners.iter().enumerate() {
        println!("#{} {}", i + 1, winner);
    }
    Ok(())
}

/// Clears recorded winners.
fn run_reset(config: &LotteryConfig) -> Result<()> {
    let desk = open_desk(config, Box::new(ThreadRandom))?;
    let cleared = desk.winners().len();
    desk.reset()?;
    println!("Cleared {} winner(s).", cleared);
    Ok(())
}

/// Prints headcounts for a roster against the recorded winners.
fn run_stats(config: &LotteryConfig, roster: &Path) -> Result<()> {
    let desk = open_desk(config, Box::new(ThreadRandom))?;
    desk.import(&read_roster(roster)?)?;
    let stats = desk.stats();

    println!(
        "Participants: {}  Attendees: {}  Eligible: {}  Winners: {}",
        stats.total(),
        stats.attendees(),
        stats.eligible(),
        stats.winners()
    );
    for frame in stats.attendee_frames() {
        let note = if *frame.excluded() { " (excluded)" } else { "" };
        println!("  {}: {}{}", frame.frame(), frame.count(), note);
    }
    Ok(())
}
