//! Session-scoped game state.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Passive income target that ends the game in victory.
pub const GOAL_PASSIVE: i32 = 200;

/// Cash the player starts a session with.
pub const START_CASH: i32 = 500;

/// Difficulty / age bracket for a session.
///
/// Fixed at game start; selects the question bank and several reward
/// magnitudes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    /// Ages 6-12: basics of saving and spending.
    Kids,
    /// Ages 13-17: budgeting, credit, investing basics.
    Teens,
    /// Ages 18+: taxes, real estate, options, wealth building.
    Adults,
}

/// State-machine mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// No game running; difficulty selection.
    Setup,
    /// Turn cycle active.
    Playing,
    /// Frozen mid-session; resumable.
    Paused,
    /// Passive income goal reached.
    Won,
}

/// The full mutable state of one play session.
///
/// Owned by [`GameEngine`](crate::GameEngine); reads go through getters,
/// writes only through engine commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    /// State-machine mode.
    pub(crate) status: Status,
    /// Difficulty for the session.
    pub(crate) tier: Tier,
    /// Current tile id, always in `1..=12`.
    pub(crate) position: u8,
    /// Cash on hand; may go negative.
    pub(crate) cash: i32,
    /// Win-condition accumulator.
    pub(crate) passive_income: i32,
    /// Player score, floored at zero.
    pub(crate) score: i32,
    /// Consecutive correct trivia-family answers.
    pub(crate) streak: i32,
    /// Running maximum of `streak`.
    pub(crate) best_streak: i32,
    /// Cosmetic currency earned on correct answers.
    pub(crate) coins: i32,
    /// Cosmetic experience earned on correct answers.
    pub(crate) xp: i32,
    /// Value of the most recent die roll this turn.
    pub(crate) last_roll: Option<u8>,
    /// Whether the player has rolled this turn.
    pub(crate) turn_moved: bool,
    /// Whether the landed tile has been resolved this turn.
    pub(crate) turn_resolved: bool,
    /// Append-only event history for the session.
    pub(crate) logs: Vec<String>,
}

impl GameState {
    /// Creates the pre-game setup state.
    pub fn new() -> Self {
        Self {
            status: Status::Setup,
            tier: Tier::Teens,
            position: 1,
            cash: START_CASH,
            passive_income: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            coins: 0,
            xp: 0,
            last_roll: None,
            turn_moved: false,
            turn_resolved: false,
            logs: vec!["Welcome to Wealth Quest! Select your difficulty to begin.".to_string()],
        }
    }

    /// Appends a line to the session log.
    pub(crate) fn log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
