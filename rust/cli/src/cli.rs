//! Command-line argument definitions.
//!
//! Parsed with clap's derive API. [`crate::run`] dispatches on [`Commands`].

use clap::{Parser, Subcommand};
use rinkside_teams::TeamStyle;

#[derive(Parser, Debug)]
#[command(
    name = "rinkside",
    version,
    about = "Dice-driven ice hockey match simulator"
)]
pub struct RinksideCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a single game and print the box score
    Game {
        #[arg(long)]
        seed: Option<u64>,
        /// Home team strength (1-99)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=99))]
        home: Option<u8>,
        /// Away team strength (1-99)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=99))]
        away: Option<u8>,
        #[arg(long, default_value = "flat")]
        home_style: TeamStyle,
        #[arg(long, default_value = "flat")]
        away_style: TeamStyle,
        /// Game length in seconds
        #[arg(long)]
        length: Option<u32>,
        /// Print one line per tick
        #[arg(long)]
        trace: bool,
    },
    /// Simulate many games, optionally recording them as JSONL
    Sim {
        #[arg(long)]
        games: u64,
        #[arg(long)]
        output: Option<String>,
        /// Base seed; game i is played with seed + i
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=99))]
        home: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=99))]
        away: Option<u8>,
        #[arg(long)]
        length: Option<u32>,
        /// Continue an interrupted run recorded in this file
        #[arg(long)]
        resume: Option<String>,
    },
    /// Aggregate results from recorded games
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Replay recorded games and check their box scores
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a sample of percentile rolls
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
}
