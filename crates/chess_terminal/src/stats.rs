//! Win/loss/draw ledger, persisted as JSON keyed by player name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chess_rules::{Color, GameOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to read stats {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write stats {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stats file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize stats: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub updated_at: DateTime<Utc>,
}

impl PlayerRecord {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            wins: 0,
            losses: 0,
            draws: 0,
            updated_at: now,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsLedger {
    players: BTreeMap<String, PlayerRecord>,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the ledger; a missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self, StatsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(StatsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|source| StatsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StatsError> {
        let json = serde_json::to_string_pretty(self).map_err(StatsError::Serialize)?;
        std::fs::write(path, json).map_err(|source| StatsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn entry(&mut self, name: &str, now: DateTime<Utc>) -> &mut PlayerRecord {
        let record = self
            .players
            .entry(name.to_string())
            .or_insert_with(|| PlayerRecord::new(now));
        record.updated_at = now;
        record
    }

    /// Credit a finished game to both players.
    pub fn record_game(
        &mut self,
        white: &str,
        black: &str,
        outcome: GameOutcome,
        now: DateTime<Utc>,
    ) {
        let name_of = |color: Color| match color {
            Color::White => white,
            Color::Black => black,
        };
        match (outcome.winner, outcome.loser) {
            (Some(winner), Some(loser)) if !outcome.draw => {
                self.entry(name_of(winner), now).wins += 1;
                self.entry(name_of(loser), now).losses += 1;
            }
            _ => {
                self.entry(white, now).draws += 1;
                self.entry(black, now).draws += 1;
            }
        }
    }

    /// Players sorted by wins, then by fewest losses, then by name.
    pub fn standings(&self) -> Vec<(&str, &PlayerRecord)> {
        let mut rows: Vec<_> = self
            .players
            .iter()
            .map(|(name, record)| (name.as_str(), record))
            .collect();
        rows.sort_by(|a, b| {
            b.1.wins
                .cmp(&a.1.wins)
                .then(a.1.losses.cmp(&b.1.losses))
                .then(a.0.cmp(b.0))
        });
        rows
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<24} {:>6} {:>6} {:>6}  {}\n",
            "Player", "Wins", "Losses", "Draws", "Updated"
        ));
        out.push_str(&"-".repeat(72));
        out.push('\n');
        for (name, record) in self.standings() {
            out.push_str(&render_row(name, record));
        }
        out
    }
}

pub fn render_row(name: &str, record: &PlayerRecord) -> String {
    format!(
        "{:<24} {:>6} {:>6} {:>6}  {}\n",
        name,
        record.wins,
        record.losses,
        record.draws,
        record.updated_at.to_rfc3339()
    )
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
