//! Persisted record of past duels.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use duel_core::{Difficulty, DuelReport};
use log::warn;
use serde::{Deserialize, Serialize};

/// One completed duel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelRecord {
    /// Unix timestamp when the duel finished.
    pub timestamp: u64,
    /// Difficulty label, or "custom" for user-supplied puzzles.
    pub difficulty: String,
    pub report: DuelReport,
}

/// Loads and appends duel history under the user data directory.
pub struct HistoryManager {
    path: Option<PathBuf>,
    records: Vec<DuelRecord>,
}

impl HistoryManager {
    /// Load history from disk; a missing or unreadable file starts empty.
    pub fn load() -> Self {
        let path = dirs::data_local_dir().map(|dir| dir.join("sudoku-duel").join("history.json"));
        Self::load_from(path)
    }

    fn load_from(path: Option<PathBuf>) -> Self {
        let records = path
            .as_deref()
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, records }
    }

    /// Append a record and persist.
    pub fn record(&mut self, difficulty: Option<Difficulty>, report: DuelReport) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.records.push(DuelRecord {
            timestamp,
            difficulty: difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "custom".to_string()),
            report,
        });
        self.save();
    }

    /// The most recent `n` records, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &DuelRecord> {
        self.records.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_string_pretty(&self.records)?;
                fs::write(path, json)
            });
        if let Err(err) = result {
            warn!("could not persist duel history to {}: {err}", path.display());
        }
    }
}
