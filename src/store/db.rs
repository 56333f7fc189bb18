//! Relational leaderboard backend (SQLite via diesel).

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::{NewScore, ScoreRecord, ScoreStore, StoreError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite-backed store.
///
/// Opens one connection per operation; SQLite serializes writers and the
/// autoincrement primary key keeps ids unique and monotonic.
#[derive(Debug, Clone)]
pub struct DbStore {
    db_path: String,
}

/// Row model for the `scores` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::scores)]
struct ScoreRow {
    id: i32,
    player_name: String,
    score: i32,
    tier: String,
    passive_income: i32,
    streak: i32,
    best_streak: i32,
    coins: i32,
    xp: i32,
    created_at: NaiveDateTime,
}

impl From<ScoreRow> for ScoreRecord {
    fn from(row: ScoreRow) -> Self {
        ScoreRecord::new(
            row.id,
            row.player_name,
            row.score,
            row.tier,
            row.passive_income,
            row.streak,
            row.best_streak,
            row.coins,
            row.xp,
            DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
        )
    }
}

/// Insertable row; id and timestamp come from the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::scores)]
struct NewScoreRow {
    player_name: String,
    score: i32,
    tier: String,
    passive_income: i32,
    streak: i32,
    best_streak: i32,
    coins: i32,
    xp: i32,
}

impl From<NewScore> for NewScoreRow {
    fn from(input: NewScore) -> Self {
        Self {
            player_name: input.player_name().clone(),
            score: *input.score(),
            tier: input.tier().clone(),
            passive_income: *input.passive_income(),
            streak: *input.streak(),
            best_streak: *input.best_streak(),
            coins: *input.coins(),
            xp: *input.xp(),
        }
    }
}

impl DbStore {
    /// Opens the database at the given path, applying any pending
    /// migrations. The file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Creating DbStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migration error: {}", e)))?;
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl ScoreStore for DbStore {
    #[instrument(skip(self))]
    fn list_top(&self, n: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut conn = self.connection()?;

        let rows = schema::scores::table
            .order((schema::scores::score.desc(), schema::scores::id.asc()))
            .limit(n as i64)
            .load::<ScoreRow>(&mut conn)?;

        debug!(count = rows.len(), "Scores listed");
        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }

    #[instrument(skip(self, input), fields(player = %input.player_name()))]
    fn create(&self, input: NewScore) -> Result<ScoreRecord, StoreError> {
        let mut conn = self.connection()?;

        let row: ScoreRow = diesel::insert_into(schema::scores::table)
            .values(NewScoreRow::from(input))
            .returning(ScoreRow::as_returning())
            .get_result(&mut conn)?;

        info!(id = row.id, score = row.score, "Score recorded");
        Ok(row.into())
    }
}
