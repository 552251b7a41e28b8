//! `game`: play one match and print its box score.

use std::io::Write;

use rinkside_engine::engine::Engine;
use rinkside_engine::rules::MatchRules;
use rinkside_teams::{create_team, TeamStyle};

use super::{check_length, load_config};
use crate::error::CliError;
use crate::formatters::{format_box_score, format_tick};

/// Flags of the `game` subcommand. `None` falls back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    pub seed: Option<u64>,
    pub home: Option<u8>,
    pub away: Option<u8>,
    pub home_style: TeamStyle,
    pub away_style: TeamStyle,
    pub length: Option<u32>,
    pub trace: bool,
}

/// Simulates a single game.
///
/// Prints the seed first so an unseeded game can be replayed, then an
/// optional per-tick trace, then the box score.
pub fn handle_game_command(
    opts: GameOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let home = opts.home.unwrap_or(cfg.home_strength);
    let away = opts.away.unwrap_or(cfg.away_strength);
    let length = check_length(opts.length.unwrap_or(cfg.game_length), err)?;

    let rules = MatchRules::default().with_game_length(length);
    let mut engine = Engine::new(
        Some(seed),
        create_team(opts.home_style, home),
        create_team(opts.away_style, away),
        rules,
    )?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(
        out,
        "Home: {} {} | Away: {} {} | Length: {}s",
        opts.home_style, home, opts.away_style, away, length
    )?;

    let score = if opts.trace {
        let mut lines = Vec::new();
        let score = engine.run_with(|t| lines.push(format_tick(t)))?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        score
    } else {
        engine.run()?
    };

    writeln!(out)?;
    writeln!(out, "{}", format_box_score(&score))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn play(opts: GameOptions) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_game_command(opts, &mut out, &mut err);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn prints_seed_and_box_score() {
        let (res, out, err) = play(GameOptions {
            seed: Some(42),
            ..GameOptions::default()
        });
        assert!(res.is_ok(), "{err}");
        assert!(out.starts_with("Seed: 42\n"));
        assert!(out.contains("Score"));
        assert!(out.contains("SOG"));
        assert!(out.contains("Saves"));
        assert!(err.is_empty());
    }

    #[test]
    #[serial]
    fn seeded_games_repeat() {
        let opts = GameOptions {
            seed: Some(7),
            home: Some(80),
            away: Some(60),
            ..GameOptions::default()
        };
        let (_, a, _) = play(opts.clone());
        let (_, b, _) = play(opts);
        assert_eq!(a, b);
    }

    #[test]
    #[serial]
    fn trace_prints_a_line_per_tick() {
        let (res, out, _) = play(GameOptions {
            seed: Some(3),
            length: Some(20),
            trace: true,
            ..GameOptions::default()
        });
        assert!(res.is_ok());
        let ticks: Vec<&str> = out.lines().filter(|l| l.starts_with('#')).collect();
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 10);
        assert!(ticks[0].contains("face_off"));
    }

    #[test]
    #[serial]
    fn zero_length_is_rejected() {
        let (res, _, err) = play(GameOptions {
            seed: Some(1),
            length: Some(0),
            ..GameOptions::default()
        });
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("length must be >= 1"));
    }
}
