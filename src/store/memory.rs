//! In-memory leaderboard backend.

use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::store::{NewScore, ScoreRecord, ScoreStore, StoreError, top_by_score};

/// Volatile store backed by a mutex-guarded vector.
///
/// Useful for tests and throwaway sessions; everything is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    scores: Vec<ScoreRecord>,
    next_id: i32,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            scores: Vec::new(),
            next_id: 1,
        }
    }
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating MemoryStore");
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    #[instrument(skip(self))]
    fn list_top(&self, n: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::new("score store lock poisoned"))?;
        let top = top_by_score(&inner.scores, n);
        debug!(count = top.len(), "Scores listed");
        Ok(top)
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
        inner.next_id += 1;
        inner.scores.push(record.clone());

        info!(id = record.id(), score = record.score(), "Score recorded");
        Ok(record)
    }
}
