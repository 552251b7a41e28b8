//! Text rendering for game results and tick traces.
//!
//! ```rust
//! use rinkside_cli::formatters::format_result_line;
//! use rinkside_engine::state::BoxScore;
//!
//! let mut score = BoxScore::default();
//! score.home.score = 3;
//! score.away.score = 1;
//! assert_eq!(format_result_line(&score), "Home wins 3-1");
//! ```

use rinkside_engine::engine::TickRecord;
use rinkside_engine::state::BoxScore;
use rinkside_engine::team::Side;

/// One-line summary of the final score, home first.
pub fn format_result_line(score: &BoxScore) -> String {
    let (h, a) = (score.home.score, score.away.score);
    match score.winner() {
        Some(Side::Home) => format!("Home wins {}-{}", h, a),
        Some(Side::Away) => format!("Away wins {}-{}", a, h),
        None => format!("Tied {}-{}", h, a),
    }
}

/// Box score table followed by the result line.
pub fn format_box_score(score: &BoxScore) -> String {
    format!("{}\n{}", score, format_result_line(score))
}

/// Saves as a percentage of saves plus goals allowed.
///
/// Shots the goalie smothered are not counted as saves, so they are left
/// out of the denominator as well.
pub fn save_percentage(saves: u64, goals: u64) -> Option<f64> {
    let faced = saves + goals;
    (faced > 0).then(|| saves as f64 / faced as f64 * 100.0)
}

/// Fixed-width line describing one dispatcher tick.
pub fn format_tick(t: &TickRecord) -> String {
    let zone = t
        .zone
        .map(|z| z.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "#{:<4} {:<12} {:>4} -> {:<4} {:<12} {:<7} zone {}  {}-{}",
        t.tick,
        t.phase.as_str(),
        t.clock_before,
        t.clock,
        if t.in_play { "in play" } else { "not in play" },
        t.possession.to_string(),
        zone,
        t.home_score,
        t.away_score,
    );
    if t.shooting {
        line.push_str("  shot lined up");
    }
    line
}
