use serde::{Deserialize, Serialize};

use crate::rules::MatchRules;
use crate::state::BoxScore;
use crate::team::Ratings;

/// Complete record of one simulated game.
/// Serialized to JSONL, one game per line, so a game can be replayed and checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// Seed of the dice the game was played with
    pub seed: u64,
    /// Ratings the home team played with
    pub home: Ratings,
    /// Ratings the away team played with
    pub away: Ratings,
    /// Rules in force; older records without this field use the defaults
    #[serde(default)]
    pub rules: MatchRules,
    /// Final box score
    pub box_score: BoxScore,
    /// Dispatcher ticks the game took
    #[serde(default)]
    pub ticks: u32,
    /// Timestamp when the game was simulated (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl GameRecord {
    /// Record for a finished game, without timestamp or metadata.
    pub fn new(
        game_id: String,
        seed: u64,
        home: Ratings,
        away: Ratings,
        rules: MatchRules,
        box_score: BoxScore,
        ticks: u32,
    ) -> Self {
        Self {
            game_id,
            seed,
            home,
            away,
            rules,
            box_score,
            ticks,
            ts: None,
            meta: None,
        }
    }
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct GameLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    /// Starts a fresh log, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref())?;
        Ok(Self::from_file(File::create(path)?))
    }

    /// Adds records to the end of an existing log, creating it if needed.
    ///
    /// Ids restart at 1; call [`GameLogger::skip`] with the number of games
    /// already recorded to continue the sequence.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref())?;
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_file(f))
    }

    fn from_file(f: File) -> Self {
        Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    /// Advances the id sequence past `n` games.
    pub fn skip(&mut self, n: u32) {
        self.seq = self.seq.saturating_add(n);
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    /// Writes one record as a single LF-terminated JSON line.
    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent),
        _ => Ok(()),
    }
}
