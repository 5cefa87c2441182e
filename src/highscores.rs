//! Per-level best scores
//!
//! Persisted through the save envelope, one record per level id. A level's
//! record is only replaced by a strictly higher score.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::level::LevelId;
use crate::persistence::{self, PersistenceError};
use crate::services::HighScoreStore;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Unix timestamp (s) when achieved
    pub timestamp: u64,
}

/// Best score per level
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: BTreeMap<LevelId, HighScoreEntry>,
    /// Save file; in-memory only when `None`
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl HighScores {
    /// Create an empty, in-memory table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`, starting fresh if nothing usable is saved there.
    ///
    /// An unreadable payload with no backup to recover from is discarded and
    /// overwritten by the next save. Only I/O failures are returned.
    /// The returned table writes back to `path` whenever a record improves.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let mut scores = match persistence::load::<HighScores>(path) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(
                err @ (PersistenceError::Json { .. } | PersistenceError::UnsupportedVersion { .. }),
            ) => {
                log::warn!("Discarding unreadable high scores, starting fresh: {err}");
                Self::new()
            }
            Err(err) => return Err(err),
        };
        scores.path = Some(path.to_path_buf());
        Ok(scores)
    }

    /// Write to the backing file, if any
    pub fn save(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        persistence::save(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Check if a score would replace the level's record
    pub fn qualifies(&self, level: &LevelId, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.best(level).is_none_or(|best| score > best)
    }

    /// Record `score` for `level` if it beats the stored best.
    /// Returns true if the record changed.
    pub fn record(&mut self, level: &LevelId, score: u64, timestamp: u64) -> bool {
        if !self.qualifies(level, score) {
            return false;
        }
        self.entries.insert(level.clone(), HighScoreEntry { score, timestamp });
        true
    }

    pub fn best(&self, level: &LevelId) -> Option<u64> {
        self.entry(level).map(|e| e.score)
    }

    pub fn entry(&self, level: &LevelId) -> Option<&HighScoreEntry> {
        self.entries.get(level)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HighScoreStore for HighScores {
    fn load_high_score(&self, level: &LevelId) -> u64 {
        self.best(level).unwrap_or(0)
    }

    fn save_high_score(&mut self, level: &LevelId, score: u64) {
        if !self.record(level, score, unix_now()) {
            log::debug!("Score {score} does not beat the record for '{level}'");
            return;
        }
        log::info!("New high score {score} for '{level}'");
        if let Err(err) = self.save() {
            log::warn!("Failed to persist high scores: {err}");
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
