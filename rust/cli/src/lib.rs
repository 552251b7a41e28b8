//! # Rinkside CLI Library
//!
//! Command-line front end for the rinkside hockey match engine: play a
//! single game, run batches of seeded games to JSONL, aggregate and verify
//! recorded games, and inspect configuration and dice.
//!
//! The entry point is [`run`], which takes its output streams as arguments
//! so it can be driven in-process by tests.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["rinkside", "game", "--seed", "42"];
//! let code = rinkside_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `game`: simulate one game and print the box score
//! - `sim`: simulate N games, optionally writing JSONL records
//! - `stats`: aggregate JSONL records from a file or directory
//! - `verify`: replay records and check their box scores
//! - `cfg`: show the resolved configuration
//! - `rng`: sample the dice for a seed

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod ui;

use cli::{Commands, RinksideCli};
use commands::{
    handle_cfg_command, handle_game_command, handle_rng_command, handle_sim_command,
    handle_stats_command, handle_verify_command, GameOptions, SimOptions,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["game", "sim", "stats", "verify", "cfg", "rng"];

/// Parses `args` and runs the selected subcommand.
///
/// Returns the process exit code: [`exit_code::SUCCESS`],
/// [`exit_code::ERROR`] for any failure, or [`exit_code::INTERRUPTED`] when
/// a simulation stopped early.
///
/// ```
/// use std::io;
/// let args = vec!["rinkside", "rng", "--seed", "42", "--count", "5"];
/// let code = rinkside_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match RinksideCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: rinkside <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: rinkside --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Game {
            seed,
            home,
            away,
            home_style,
            away_style,
            length,
            trace,
        } => handle_game_command(
            GameOptions {
                seed,
                home,
                away,
                home_style,
                away_style,
                length,
                trace,
            },
            out,
            err,
        ),
        Commands::Sim {
            games,
            output,
            seed,
            home,
            away,
            length,
            resume,
        } => handle_sim_command(
            SimOptions {
                games,
                output,
                seed,
                home,
                away,
                length,
                resume,
            },
            out,
            err,
        ),
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Verify { input } => {
            let Some(path) = input else {
                let _ = ui::write_error(err, "input required");
                return exit_code::ERROR;
            };
            handle_verify_command(path, out, err)
        }
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Rng { seed, count } => handle_rng_command(seed, count, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_command_parses() {
        let commands = vec![
            vec!["rinkside", "game"],
            vec!["rinkside", "sim", "--games", "1"],
            vec!["rinkside", "stats", "--input", "games.jsonl"],
            vec!["rinkside", "verify", "--input", "games.jsonl"],
            vec!["rinkside", "cfg"],
            vec!["rinkside", "rng"],
        ];
        assert_eq!(commands.len(), COMMANDS.len());
        for args in commands {
            assert!(RinksideCli::try_parse_from(&args).is_ok(), "{:?}", args);
        }
    }

    #[test]
    fn strength_must_be_within_rating_range() {
        assert!(RinksideCli::try_parse_from(["rinkside", "game", "--home", "0"]).is_err());
        assert!(RinksideCli::try_parse_from(["rinkside", "game", "--away", "100"]).is_err());
        assert!(RinksideCli::try_parse_from(["rinkside", "game", "--home", "99"]).is_ok());
    }

    #[test]
    fn styles_parse_from_flags() {
        let cli =
            RinksideCli::try_parse_from(["rinkside", "game", "--home-style", "offensive"]).unwrap();
        match cli.cmd {
            Commands::Game {
                home_style,
                away_style,
                ..
            } => {
                assert_eq!(home_style, rinkside_teams::TeamStyle::Offensive);
                assert_eq!(away_style, rinkside_teams::TeamStyle::Flat);
            }
            other => panic!("expected game, got {:?}", other),
        }
        assert!(RinksideCli::try_parse_from(["rinkside", "game", "--home-style", "trap"]).is_err());
    }

    #[test]
    fn unknown_command_lists_commands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["rinkside", "shootout"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let err = String::from_utf8(err).unwrap();
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}", c)));
        }
    }

    #[test]
    fn help_goes_to_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(run(["rinkside", "--help"], &mut out, &mut err), 0);
        assert!(String::from_utf8(out).unwrap().contains("game"));
    }
}
