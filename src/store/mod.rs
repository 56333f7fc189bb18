//! Leaderboard persistence layer.
//!
//! The reducer and HTTP surface depend only on [`ScoreStore`]; the backing
//! implementation is chosen explicitly at construction (CLI flag or test
//! setup), never sniffed from the environment.

mod db;
mod error;
mod file;
mod memory;
mod records;
mod schema; // Diesel generated schema - internal use only

pub use db::DbStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{NewScore, ScoreRecord, ValidationError};

/// Contract every leaderboard backend satisfies.
///
/// `create` persists durably before returning and assigns a unique,
/// monotonically increasing id; concurrent submitters never observe a
/// duplicate. `list_top` orders by score descending, ties broken by
/// insertion order. Underlying storage keeps every submitted record even
/// when reads are capped.
pub trait ScoreStore: Send + Sync {
    /// Returns up to `n` records, highest score first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn list_top(&self, n: usize) -> Result<Vec<ScoreRecord>, StoreError>;

    /// Persists a submission, assigning its id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be made durable; the
    /// caller's session state remains valid and the submission may be
    /// retried.
    fn create(&self, input: NewScore) -> Result<ScoreRecord, StoreError>;
}

/// Sorts a snapshot by score descending and truncates to `n`.
///
/// The sort is stable, so equal scores keep their insertion order.
pub(crate) fn top_by_score(scores: &[ScoreRecord], n: usize) -> Vec<ScoreRecord> {
    let mut top = scores.to_vec();
    top.sort_by(|a, b| b.score().cmp(a.score()));
    top.truncate(n);
    top
}
