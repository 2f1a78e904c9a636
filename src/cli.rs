//! Command-line interface for attendee_lottery.

use clap::{Parser, Subcommand};

/// Attendee Lottery - draw non-repeating winners from an event roster
#[derive(Parser, Debug)]
#[command(name = "attendee_lottery")]
#[command(about = "Draw non-repeating winners from an attendee roster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Override the winner history directory
    #[arg(long, global = true)]
    pub history_dir: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a roster and draw winners
    Draw {
        /// Roster file (comma separated, header on the first line)
        #[arg(short, long)]
        roster: std::path::PathBuf,

        /// Number of winners to draw
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Reveal winners without the suspense pause
        #[arg(long)]
        no_suspense: bool,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List recorded winners
    Winners,

    /// Clear recorded winners
    Reset,

    /// Show headcounts for a roster
    Stats {
        /// Roster file (comma separated, header on the first line)
        #[arg(short, long)]
        roster: std::path::PathBuf,
    },
}
