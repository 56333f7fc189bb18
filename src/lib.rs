//! Wealth Quest: a financial-literacy board game engine with a persistent
//! leaderboard.
//!
//! The crate is split into three layers:
//!
//! - [`GameEngine`] owns a single session's [`GameState`] and resolves
//!   commands (start, roll, resolve, answer, end turn) into state changes
//!   plus a list of [`Effect`]s for the presentation layer.
//! - [`ScoreStore`] abstracts leaderboard persistence, with in-memory,
//!   JSON-file, and SQLite backends chosen explicitly at construction.
//! - [`router`] exposes the leaderboard over REST (`GET /scores`,
//!   `POST /scores`).
//!
//! Game content (board tiles, question banks, decision cards) lives in
//! [`content`] as static tables.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod server;
mod store;

pub use game::content;
pub use game::{
    BOARD_SIZE, CommandError, Decision, DecisionChoice, DieRoll, Effect, GOAL_PASSIVE, GameEngine,
    GameState, PendingPrompt, Question, ResultLine, START_CASH, Status, Tier, Tile, TileKind,
    TILES, decision_for, format_money, invest_passive_reward, question_bank, tile,
};
pub use server::{AppState, TOP_SCORES, router, seed_demo_scores};
pub use store::{
    DbStore, FileStore, MemoryStore, NewScore, ScoreRecord, ScoreStore, StoreError,
    ValidationError,
};
