//! Game core: content tables, session state, and the turn-resolution
//! engine.

pub mod content;
mod engine;
mod state;

pub use content::{
    BOARD_SIZE, Decision, DecisionChoice, Question, ResultLine, Tile, TileKind, TILES,
    decision_for, format_money, invest_passive_reward, question_bank, tile,
};
pub use engine::{CommandError, DieRoll, Effect, GameEngine, PendingPrompt};
pub use state::{GOAL_PASSIVE, GameState, START_CASH, Status, Tier};
