//! File-backed leaderboard: one JSON document, rewritten wholesale on every
//! create.
//!
//! Document layout: `{ "scores": [...], "nextId": n, "lastUpdated": iso8601 }`.
//! A missing or corrupt file is not fatal; the store starts empty and
//! overwrites it on the next successful create.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::store::{NewScore, ScoreRecord, ScoreStore, StoreError, top_by_score};

/// Persistent store backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    scores: Vec<ScoreRecord>,
    next_id: i32,
}

/// On-disk document shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDocument {
    #[serde(default)]
    scores: Vec<ScoreRecord>,
    #[serde(default)]
    next_id: Option<i32>,
    #[serde(default)]
    last_updated: Option<String>,
}

impl FileStore {
    /// Opens (or initializes) a file store at the given path.
    ///
    /// The whole document is loaded into memory here; corruption or absence
    /// of the file is tolerated and logged, never an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let inner = Self::load(&path);
        info!(
            path = %path.display(),
            count = inner.scores.len(),
            next_id = inner.next_id,
            "FileStore opened"
        );
        Self {
            path,
            inner: Mutex::new(inner),
        }
    }

    fn load(path: &Path) -> Inner {
        let empty = Inner {
            scores: Vec::new(),
            next_id: 1,
        };

        if !path.exists() {
            debug!(path = %path.display(), "No existing data file, starting fresh");
            return empty;
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Could not read data file, starting fresh");
                return empty;
            }
        };

        match serde_json::from_str::<FileDocument>(&text) {
            Ok(doc) => {
                // Recover nextId from the records when the field is absent.
                let next_id = doc.next_id.unwrap_or_else(|| {
                    doc.scores.iter().map(|s| *s.id()).max().unwrap_or(0) + 1
                });
                Inner {
                    scores: doc.scores,
                    next_id,
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Corrupt data file, starting fresh");
                empty
            }
        }
    }

    fn save(&self, inner: &Inner) -> Result<(), StoreError> {
        let doc = FileDocument {
            scores: inner.scores.clone(),
            next_id: Some(inner.next_id),
            last_updated: Some(Utc::now().to_rfc3339()),
        };
        let text = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&self.path, text)?;
        debug!(
            path = %self.path.display(),
            count = inner.scores.len(),
            "Scores saved"
        );
        Ok(())
    }
}

impl ScoreStore for FileStore {
    #[instrument(skip(self))]
    fn list_top(&self, n: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::new("score store lock poisoned"))?;
        Ok(top_by_score(&inner.scores, n))
    }

    #[instrument(skip(self, input), fields(player = %input.player_name()))]
    fn create(&self, input: NewScore) -> Result<ScoreRecord, StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::new("score store lock poisoned"))?;

        let record = ScoreRecord::new(
            inner.next_id,
            input.player_name().clone(),
            *input.score(),
            input.tier().clone(),
            *input.passive_income(),
            *input.streak(),
            *input.best_streak(),
            *input.coins(),
            *input.xp(),
            Utc::now(),
        );
        // Commit in-memory state only once the write lands, so a failed
        // create leaves the store exactly as it was.
        let mut candidate = Inner {
            scores: inner.scores.clone(),
            next_id: inner.next_id + 1,
        };
        candidate.scores.push(record.clone());
        self.save(&candidate)?;
        *inner = candidate;

        info!(id = record.id(), score = record.score(), "Score recorded");
        Ok(record)
    }
}
