//! Leaderboard record types shared by every backend.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A persisted leaderboard entry.
///
/// Created once when a finished game is submitted; never mutated after
/// creation. Ids are unique and monotonically increasing within a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    id: i32,
    player_name: String,
    score: i32,
    tier: String,
    passive_income: i32,
    streak: i32,
    best_streak: i32,
    coins: i32,
    xp: i32,
    created_at: DateTime<Utc>,
}

/// Insert form for a leaderboard entry.
///
/// `player_name`, `score`, and `tier` are required on the wire; the numeric
/// extras default to zero when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    player_name: String,
    score: i32,
    tier: String,
    #[serde(default)]
    passive_income: i32,
    #[serde(default)]
    streak: i32,
    #[serde(default)]
    best_streak: i32,
    #[serde(default)]
    coins: i32,
    #[serde(default)]
    xp: i32,
}

impl NewScore {
    /// Checks the submission for client errors.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the player name is empty or
    /// whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.player_name.trim().is_empty() {
            return Err(ValidationError::new("playerName must not be empty"));
        }
        Ok(())
    }
}

/// A score submission failed validation.
///
/// Surfaced to HTTP clients as a 400; never touches stored state.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid input: {message}")]
pub struct ValidationError {
    /// What was wrong with the payload.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
