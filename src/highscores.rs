//! High score persistence
//!
//! A single integer best score, stored as `{"highscore": n}`. Every failure
//! (missing file, corrupt JSON, write error) is handled here and never reaches
//! the game: a bad read means "no score yet", a bad write keeps the old value.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the best score lives
pub trait HighScoreStore {
    /// Stored best score, 0 when there is none
    fn load_highscore(&self) -> i64;

    /// Offer a finished round's score. Returns `max(stored, candidate)` and
    /// persists only a strict improvement.
    fn update_highscore(&mut self, candidate: i64) -> i64;
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(default)]
    highscore: i64,
}

#[derive(Debug)]
enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "i/o error: {e}"),
            StoreError::Json(e) => write!(f, "bad high score data: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<i64>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let record: HighScoreRecord = serde_json::from_str(&json).map_err(StoreError::Json)?;
        Ok(Some(record.highscore))
    }

    fn write(&self, highscore: i64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreRecord { highscore }).map_err(StoreError::Json)?;
        std::fs::write(&self.path, json).map_err(StoreError::Io)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_highscore(&self) -> i64 {
        match self.read() {
            Ok(Some(score)) => score,
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Ignoring high score file {}: {e}", self.path.display());
                0
            }
        }
    }

    fn update_highscore(&mut self, candidate: i64) -> i64 {
        let stored = self.load_highscore();
        if candidate <= stored {
            return stored;
        }
        match self.write(candidate) {
            Ok(()) => {
                log::info!("New high score {candidate} saved");
                candidate
            }
            Err(e) => {
                log::warn!("Could not save high score to {}: {e}", self.path.display());
                stored
            }
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    highscore: i64,
    /// Every candidate offered, in order
    submissions: Vec<i64>,
}

impl MemoryStore {
    pub fn new(highscore: i64) -> Self {
        Self {
            highscore,
            submissions: Vec::new(),
        }
    }

    pub fn submissions(&self) -> &[i64] {
        &self.submissions
    }
}

impl HighScoreStore for MemoryStore {
    fn load_highscore(&self) -> i64 {
        self.highscore
    }

    fn update_highscore(&mut self, candidate: i64) -> i64 {
        self.submissions.push(candidate);
        if candidate > self.highscore {
            self.highscore = candidate;
        }
        self.highscore
    }
}
