//! `verify`: replay recorded games and check them against their records.
//!
//! Every record carries the seed, ratings and rules it was played with, so
//! replaying it must reproduce the stored box score and tick count exactly.
//! Records are also checked for a well-formed game id and for counters that
//! cannot occur in a real game.

use std::collections::HashSet;
use std::io::Write;

use rinkside_engine::engine::Engine;
use rinkside_engine::logger::GameRecord;
use rinkside_engine::state::BoxScore;

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text_auto;

/// Errors are keyed by game id, or by line number when the id is unknown.
type VerifyError = BatchValidationError<String>;

/// Checks every record in `input`.
///
/// Prints `Verify: OK` or `Verify: FAIL` with the game count; the failures
/// themselves go to `err`.
pub fn handle_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(&input).map_err(CliError::InvalidInput)?;
    let mut errors: Vec<VerifyError> = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut games = 0u64;

    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        games += 1;
        let rec: GameRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                errors.push(VerifyError {
                    item_context: format!("line {}", n + 1),
                    message: format!("Invalid JSON record: {}", e),
                });
                continue;
            }
        };
        let ctx = rec.game_id.clone();

        if !valid_game_id(&rec.game_id) {
            errors.push(VerifyError {
                item_context: ctx.clone(),
                message: "game_id is not of the form YYYYMMDD-NNNNNN".to_string(),
            });
        }
        if !seen_ids.insert(rec.game_id.clone()) {
            errors.push(VerifyError {
                item_context: ctx.clone(),
                message: "duplicate game_id".to_string(),
            });
        }
        for message in counter_problems(&rec.box_score) {
            errors.push(VerifyError {
                item_context: ctx.clone(),
                message,
            });
        }
        if let Err(message) = replay(&rec) {
            errors.push(VerifyError {
                item_context: ctx,
                message,
            });
        }
    }

    if errors.is_empty() {
        writeln!(out, "Verify: OK (games={})", games)?;
        Ok(())
    } else {
        writeln!(out, "Verify: FAIL (games={})", games)?;
        writeln!(err)?;
        writeln!(err, "Errors found:")?;
        for error in &errors {
            writeln!(err, "  {}", error)?;
        }
        writeln!(err)?;
        Err(CliError::InvalidInput(format!(
            "{} verification error(s)",
            errors.len()
        )))
    }
}

fn valid_game_id(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 15
        && b[..8].iter().all(u8::is_ascii_digit)
        && b[8] == b'-'
        && b[9..].iter().all(u8::is_ascii_digit)
}

/// Counter combinations the engine can never produce.
fn counter_problems(b: &BoxScore) -> Vec<String> {
    let mut problems = Vec::new();
    for (name, shooter, goalie) in [("home", &b.home, &b.away), ("away", &b.away, &b.home)] {
        if shooter.score > shooter.shots_on_goal {
            problems.push(format!(
                "{} scored {} goals on {} shots",
                name, shooter.score, shooter.shots_on_goal
            ));
        } else if goalie.saves > shooter.shots_on_goal - shooter.score {
            problems.push(format!(
                "{} goalie credited with {} saves against {} unconverted shots",
                if name == "home" { "away" } else { "home" },
                goalie.saves,
                shooter.shots_on_goal - shooter.score
            ));
        }
    }
    problems
}

/// Replays the game and compares the outcome.
fn replay(rec: &GameRecord) -> Result<(), String> {
    let mut engine = Engine::new(
        Some(rec.seed),
        Box::new(rec.home),
        Box::new(rec.away),
        rec.rules,
    )
    .map_err(|e| format!("cannot replay: {}", e))?;
    let score = engine.run().map_err(|e| format!("replay failed: {}", e))?;

    if score != rec.box_score {
        return Err(format!(
            "replayed box score {}-{} (SOG {}-{}, saves {}-{}) differs from recorded {}-{} (SOG {}-{}, saves {}-{})",
            score.home.score,
            score.away.score,
            score.home.shots_on_goal,
            score.away.shots_on_goal,
            score.home.saves,
            score.away.saves,
            rec.box_score.home.score,
            rec.box_score.away.score,
            rec.box_score.home.shots_on_goal,
            rec.box_score.away.shots_on_goal,
            rec.box_score.home.saves,
            rec.box_score.away.saves,
        ));
    }
    // older records without a tick count skip this check
    if rec.ticks != 0 && rec.ticks != engine.ticks() {
        return Err(format!(
            "replay took {} ticks, record says {}",
            engine.ticks(),
            rec.ticks
        ));
    }
    Ok(())
}
