//! `stats`: aggregate recorded games.
//!
//! Reads a JSONL file, a `.jsonl.zst` archive, or every such file under a
//! directory, and prints one JSON summary.

use std::io::Write;
use std::path::Path;

use rinkside_engine::logger::GameRecord;
use rinkside_engine::team::Side;

use crate::error::CliError;
use crate::formatters::save_percentage;
use crate::io_utils::read_text_auto;
use crate::ui;

#[derive(Debug, Default)]
struct Totals {
    games: u64,
    home_wins: u64,
    away_wins: u64,
    ties: u64,
    home_goals: u64,
    away_goals: u64,
    home_shots: u64,
    away_shots: u64,
    home_saves: u64,
    away_saves: u64,
    /// Final line without a newline that did not parse, i.e. a write cut short
    skipped: u64,
    corrupted: u64,
}

impl Totals {
    fn add(&mut self, rec: &GameRecord) {
        let b = &rec.box_score;
        self.games += 1;
        match b.winner() {
            Some(Side::Home) => self.home_wins += 1,
            Some(Side::Away) => self.away_wins += 1,
            None => self.ties += 1,
        }
        self.home_goals += u64::from(b.home.score);
        self.away_goals += u64::from(b.away.score);
        self.home_shots += u64::from(b.home.shots_on_goal);
        self.away_shots += u64::from(b.away.shots_on_goal);
        self.home_saves += u64::from(b.home.saves);
        self.away_saves += u64::from(b.away.saves);
    }

    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            match serde_json::from_str::<GameRecord>(line) {
                Ok(rec) => self.add(&rec),
                Err(_) if i == lines.len() - 1 && !has_trailing_nl => self.skipped += 1,
                Err(_) => self.corrupted += 1,
            }
        }
    }

    fn summary(&self) -> serde_json::Value {
        let per_game = |n: u64| {
            if self.games == 0 {
                0.0
            } else {
                n as f64 / self.games as f64
            }
        };
        serde_json::json!({
            "games": self.games,
            "results": {
                "home_wins": self.home_wins,
                "away_wins": self.away_wins,
                "ties": self.ties,
            },
            "home": {
                "goals": self.home_goals,
                "shots_on_goal": self.home_shots,
                "saves": self.home_saves,
                "goals_per_game": per_game(self.home_goals),
                "save_pct": save_percentage(self.home_saves, self.away_goals),
            },
            "away": {
                "goals": self.away_goals,
                "shots_on_goal": self.away_shots,
                "saves": self.away_saves,
                "goals_per_game": per_game(self.away_goals),
                "save_pct": save_percentage(self.away_saves, self.home_goals),
            },
        })
    }
}

/// Aggregates game records found at `input`.
///
/// Unreadable lines are counted and reported on `err` rather than failing
/// the whole run, unless a single file yields no games at all.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    let mut totals = Totals::default();

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let Ok(rd) = std::fs::read_dir(&d) else {
                continue;
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => totals.consume(&content),
                        Err(_) => totals.corrupted += 1,
                    }
                }
            }
        }
    } else {
        match read_text_auto(&input) {
            Ok(s) => totals.consume(&s),
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}", e))?;
                return Err(CliError::InvalidInput(format!("Failed to read {}", e)));
            }
        }
    }

    if totals.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", totals.corrupted),
        )?;
    }
    if totals.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", totals.skipped),
        )?;
    }
    if !path.is_dir() && totals.games == 0 && (totals.corrupted > 0 || totals.skipped > 0) {
        ui::write_error(err, "No valid game records")?;
        return Err(CliError::InvalidInput("No valid game records".to_string()));
    }

    let json = serde_json::to_string_pretty(&totals.summary())
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rinkside_engine::rules::MatchRules;
    use rinkside_engine::state::BoxScore;
    use rinkside_engine::team::Ratings;

    fn line(id: u32, home: u32, away: u32) -> String {
        let mut b = BoxScore::default();
        b.home.score = home;
        b.home.shots_on_goal = home + 3;
        b.away.score = away;
        b.away.shots_on_goal = away + 2;
        b.home.saves = 2;
        b.away.saves = 3;
        let rec = GameRecord::new(
            format!("20260101-{:06}", id),
            u64::from(id),
            Ratings::uniform(77),
            Ratings::uniform(73),
            MatchRules::default(),
            b,
            40,
        );
        serde_json::to_string(&rec).unwrap()
    }

    fn stats(path: &Path) -> (Result<(), CliError>, serde_json::Value, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_stats_command(path.to_string_lossy().into_owned(), &mut out, &mut err);
        let json = serde_json::from_slice(&out).unwrap_or(serde_json::Value::Null);
        (res, json, String::from_utf8(err).unwrap())
    }

    #[test]
    fn tallies_results_and_counters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        let body = format!("{}\n{}\n{}\n", line(1, 3, 1), line(2, 0, 2), line(3, 2, 2));
        std::fs::write(&path, body).unwrap();

        let (res, json, err) = stats(&path);
        assert!(res.is_ok(), "{err}");
        assert_eq!(json["games"], 3);
        assert_eq!(json["results"]["home_wins"], 1);
        assert_eq!(json["results"]["away_wins"], 1);
        assert_eq!(json["results"]["ties"], 1);
        assert_eq!(json["home"]["goals"], 5);
        assert_eq!(json["away"]["shots_on_goal"], 11);
        assert_eq!(json["home"]["saves"], 6);
    }

    #[test]
    fn corrupted_lines_are_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        let body = format!("{}\n{{broken\n{}\n{{\"game_id\":", line(1, 1, 0), line(2, 0, 1));
        std::fs::write(&path, body).unwrap();

        let (res, json, err) = stats(&path);
        assert!(res.is_ok());
        assert_eq!(json["games"], 2);
        assert!(err.contains("Skipped 1 corrupted record(s)"));
        assert!(err.contains("Discarded 1 incomplete final line(s)"));
    }

    #[test]
    fn file_with_only_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        std::fs::write(&path, "nope\n").unwrap();
        let (res, _, err) = stats(&path);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("No valid game records"));
    }

    #[test]
    fn walks_directories_and_archives() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("season");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a.jsonl"), format!("{}\n", line(1, 1, 0))).unwrap();
        let packed = zstd::bulk::compress(format!("{}\n", line(2, 2, 0)).as_bytes(), 3).unwrap();
        std::fs::write(nested.join("b.jsonl.zst"), packed).unwrap();
        std::fs::write(nested.join("notes.txt"), "ignored").unwrap();

        let (res, json, _) = stats(dir.path());
        assert!(res.is_ok());
        assert_eq!(json["games"], 2);
        assert_eq!(json["results"]["home_wins"], 2);
    }

    #[test]
    fn missing_input_is_an_error() {
        let (res, _, err) = stats(Path::new("no/such/games.jsonl"));
        assert!(res.is_err());
        assert!(err.contains("Failed to read"));
    }
}
