//! High-score persistence.
//!
//! The engine only ever sees an integer: [`HighScoreStore::load`] is called
//! once at startup and [`HighScoreStore::save`] whenever a run sets a new
//! high score. A missing or unreadable record is treated as "no high score
//! yet" (0) rather than an error.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Boundary to durable high-score storage.
pub trait HighScoreStore {
    /// Stored high score, or 0 when absent or corrupt.
    fn load(&self) -> u32;

    /// Persist `score` as the new high score.
    fn save(&self, score: u32) -> Result<()>;
}

/// On-disk record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// Stores the high score as a small JSON document.
///
/// A bare integer (the legacy plain-text format) is also accepted on load.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the record is staged in before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        parse_record(&text).with_context(|| format!("parsing {}", self.path.display()))
    }
}

fn parse_record(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return Ok(n);
    }
    let record: HighScoreRecord = serde_json::from_str(trimmed)?;
    Ok(record.high_score)
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no high score file");
            return 0;
        }
        match self.read() {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "ignoring unreadable high score");
                0
            }
        }
    }

    fn save(&self, score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        // Stage then rename, so a crash mid-write never truncates the record.
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        let staging = self.staging_path();
        fs::write(&staging, json)
            .with_context(|| format!("writing {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        debug!(path = %self.path.display(), score, "high score saved");
        Ok(())
    }
}

/// Volatile store for tests and sessions without a writable filesystem.
#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    value: Cell<u32>,
    saves: Cell<u32>,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Cell::new(initial),
            saves: Cell::new(0),
        }
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn save(&self, score: u32) -> Result<()> {
        self.value.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &S {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&self, score: u32) -> Result<()> {
        (**self).save(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_json_and_plain_integer() {
        assert_eq!(parse_record("{\"high_score\":1200}").unwrap(), 1200);
        assert_eq!(parse_record("  4500\n").unwrap(), 4500);
        assert!(parse_record("not a number").is_err());
        assert!(parse_record("-3").is_err());
    }

    #[test]
    fn staging_file_sits_next_to_target() {
        let store = FileHighScoreStore::new("/var/games/highscore.json");
        assert_eq!(
            store.staging_path(),
            PathBuf::from("/var/games/highscore.json.tmp")
        );
    }

    #[test]
    fn memory_store_counts_saves() {
        let store = MemoryHighScoreStore::new(10);
        assert_eq!(store.load(), 10);
        store.save(20).unwrap();
        assert_eq!(store.load(), 20);
        assert_eq!(store.save_count(), 1);
    }
}
