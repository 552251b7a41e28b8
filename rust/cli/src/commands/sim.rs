//! `sim`: play many games in a row and optionally record them.
//!
//! Game `i` is played with seed `base + i`, so any recorded game can be
//! replayed on its own. The base seed is printed; an unseeded `--resume`
//! continues from the base of the file's first record.
//!
//! # Environment Variables
//!
//! - `RINKSIDE_SIM_BREAK_AFTER`: stop after N games as if interrupted

use std::collections::HashSet;
use std::io::Write;

use rinkside_engine::engine::Engine;
use rinkside_engine::logger::{GameLogger, GameRecord};
use rinkside_engine::rules::MatchRules;
use rinkside_engine::team::RatingProvider;
use rinkside_teams::{create_team, TeamStyle};
use tracing::info;

use super::{check_length, load_config};
use crate::error::CliError;
use crate::ui;

pub const BREAK_AFTER_ENV: &str = "RINKSIDE_SIM_BREAK_AFTER";

/// Flags of the `sim` subcommand.
#[derive(Debug, Clone, Default)]
pub struct SimOptions {
    pub games: u64,
    pub output: Option<String>,
    pub seed: Option<u64>,
    pub home: Option<u8>,
    pub away: Option<u8>,
    pub length: Option<u32>,
    pub resume: Option<String>,
}

/// Runs the simulation.
///
/// With `resume`, the unique game ids already in that file count as done
/// and new games are appended to it.
pub fn handle_sim_command(
    opts: SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let total = opts.games;
    if total == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let cfg = load_config(err)?;
    let home = opts.home.unwrap_or(cfg.home_strength);
    let away = opts.away.unwrap_or(cfg.away_strength);
    let length = check_length(opts.length.unwrap_or(cfg.game_length), err)?;
    let rules = MatchRules::default().with_game_length(length);

    let mut completed = 0u64;
    let mut recorded_base = None;
    let mut path = opts.output.clone();

    if let Some(res) = opts.resume.as_ref() {
        let recorded = count_recorded_games(res);
        completed = recorded.unique;
        recorded_base = recorded.base_seed;
        path = Some(res.clone());
        if recorded.duplicates > 0 {
            ui::display_warning(
                err,
                &format!("{} duplicate game_id(s) skipped", recorded.duplicates),
            )?;
        }
        writeln!(out, "Resumed from {}", completed)?;
    }

    let base_seed = opts
        .seed
        .or(cfg.seed)
        .or(recorded_base)
        .unwrap_or_else(rand::random);
    writeln!(out, "Seed: {}", base_seed)?;

    let mut logger = match path.as_deref() {
        Some(p) => {
            let opened = if opts.resume.is_some() {
                GameLogger::append(p)
            } else {
                GameLogger::create(p)
            };
            match opened {
                Ok(mut l) => {
                    l.skip(u32::try_from(completed).unwrap_or(u32::MAX));
                    Some(l)
                }
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open {}: {}", p, e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok());

    for i in completed..total {
        let seed = base_seed.wrapping_add(i);
        let home_team = create_team(TeamStyle::Flat, home);
        let away_team = create_team(TeamStyle::Flat, away);
        let (home_ratings, away_ratings) = (home_team.ratings(), away_team.ratings());

        let mut engine = Engine::new(Some(seed), home_team, away_team, rules)?;
        let score = engine.run()?;

        if let Some(l) = logger.as_mut() {
            let id = l.next_id();
            let record = GameRecord::new(
                id,
                seed,
                home_ratings,
                away_ratings,
                rules,
                score,
                engine.ticks(),
            );
            if let Err(e) = l.write(&record) {
                ui::write_error(err, "Failed to write game record")?;
                return Err(CliError::Io(e));
            }
        }

        completed += 1;

        if let Some(b) = break_after
            && completed == b
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!("saved {}/{}", completed, total)));
        }
    }

    info!(games = completed, base_seed, "simulation finished");
    writeln!(out, "Simulated: {} games", completed)?;
    Ok(())
}

/// What an earlier run left in its output file.
#[derive(Debug, Default, PartialEq, Eq)]
struct RecordedGames {
    unique: u64,
    duplicates: u64,
    /// Seed of the first record, i.e. the run's base seed
    base_seed: Option<u64>,
}

/// Counts unique and duplicate game ids in an earlier run's output.
///
/// A missing file counts as an empty run.
fn count_recorded_games(path: &str) -> RecordedGames {
    let contents = std::fs::read_to_string(path).unwrap_or_default();
    let mut seen = HashSet::new();
    let mut recorded = RecordedGames::default();

    for line in contents.lines().filter(|l| !l.trim().is_empty()) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        let Some(id) = value.get("game_id").and_then(|x| x.as_str()) else {
            continue;
        };
        if recorded.base_seed.is_none() {
            recorded.base_seed = value.get("seed").and_then(|x| x.as_u64());
        }
        if !seen.insert(id.to_string()) {
            recorded.duplicates += 1;
        }
    }
    recorded.unique = seen.len() as u64;
    recorded
}
