//! High score persistence
//!
//! The simulation only exposes a final score once a run is over. This store
//! compares it with the saved best and keeps the maximum in a small JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk high score record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,

    /// Version of the game that wrote the record
    pub version: String,
}

impl HighScoreRecord {
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// JSON file holding the best score across sessions
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved high score; a missing file counts as zero
    pub fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord =
            serde_json::from_str(&json).context("Failed to deserialize high score")?;

        Ok(record.high_score)
    }

    /// Persist `final_score` if it beats the saved one
    ///
    /// Returns whether a new high score was written.
    pub fn record(&self, final_score: u32) -> Result<bool> {
        let previous = self.load()?;
        if final_score <= previous {
            return Ok(false);
        }

        self.save(final_score)?;
        Ok(true)
    }

    fn save(&self, high_score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord::new(high_score))
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(temp_dir.path().join("high_score.json"));

        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_record_keeps_maximum() {
        let temp_dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(temp_dir.path().join("nested/high_score.json"));

        assert!(store.record(120).unwrap());
        assert_eq!(store.load().unwrap(), 120);

        assert!(!store.record(80).unwrap());
        assert!(!store.record(120).unwrap());
        assert_eq!(store.load().unwrap(), 120);

        assert!(store.record(300).unwrap());
        assert_eq!(store.load().unwrap(), 300);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high_score.json");
        std::fs::write(&path, "not json").unwrap();

        let store = HighScoreStore::new(path);
        assert!(store.load().is_err());
        assert!(store.record(10).is_err());
    }

    #[test]
    fn test_record_serialization() {
        let record = HighScoreRecord::new(450);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: HighScoreRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.high_score, 450);
        assert_eq!(deserialized.version, env!("CARGO_PKG_VERSION"));
    }
}
