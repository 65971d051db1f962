//! Best-score record persisted between runs.

use crate::core::constants::HIGH_SCORE_FILE;
use crate::market::LiquidityLedger;
use crate::utils::persistence::{load_json, save_json, save_path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u64,
    pub top_speed: f64,
    pub achieved_at: DateTime<Utc>,
}

impl HighScore {
    pub fn from_ledger(ledger: &LiquidityLedger, achieved_at: DateTime<Utc>) -> Self {
        Self {
            score: ledger.score(),
            top_speed: ledger.top_speed(),
            achieved_at,
        }
    }

    pub fn beats(&self, other: &HighScore) -> bool {
        self.score > other.score
    }
}

/// Reads and writes the high score file. Defaults to ~/.hypers-drive/highscore.json.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            path: save_path(HIGH_SCORE_FILE)?,
        })
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored record, or `None` if the file is missing or unreadable.
    pub fn load(&self) -> Option<HighScore> {
        load_json(&self.path).ok()
    }

    /// Save `candidate` if it beats the stored record. Returns whether it did.
    pub fn record_if_best(&self, candidate: &HighScore) -> io::Result<bool> {
        if let Some(current) = self.load() {
            if !candidate.beats(&current) {
                return Ok(false);
            }
        }
        save_json(&self.path, candidate)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_store(name: &str) -> HighScoreStore {
        let path =
            std::env::temp_dir().join(format!("hypers_drive_hs_{}_{}.json", std::process::id(), name));
        fs::remove_file(&path).ok();
        HighScoreStore::at(path)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = temp_store("missing");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_record_if_best_only_on_improvement() {
        let store = temp_store("improve");
        let mut ledger = LiquidityLedger::new();
        ledger.add_score(12);
        ledger.record_speed(6.0);
        let first = HighScore::from_ledger(&ledger, Utc::now());

        assert!(store.record_if_best(&first).unwrap());
        assert_eq!(store.load(), Some(first.clone()));

        let worse = HighScore {
            score: 5,
            ..first.clone()
        };
        assert!(!store.record_if_best(&worse).unwrap());

        let tie = first.clone();
        assert!(!store.record_if_best(&tie).unwrap());

        let better = HighScore {
            score: 13,
            ..first.clone()
        };
        assert!(store.record_if_best(&better).unwrap());
        assert_eq!(store.load().map(|hs| hs.score), Some(13));

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "{{{").unwrap();
        assert_eq!(store.load(), None);
        fs::remove_file(store.path()).ok();
    }
}
