//! Turn-resolution engine.
//!
//! The engine is a synchronous reducer over [`GameState`]: every command
//! either mutates the state and returns presentation-intent [`Effect`]s, or
//! is rejected with a [`CommandError`] leaving the state untouched. The
//! calling layer is expected to gate commands itself (disable the roll
//! button once rolled, and so on); the engine re-checks every precondition
//! anyway so a mis-gated caller cannot corrupt the turn cycle.
//!
//! Randomness (the die, the question draw) is injected through `rand::Rng`
//! so tests can drive the engine deterministically via the `*_with`
//! variants.

use derive_more::{Display, Error};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::game::content::{self, BOARD_SIZE, Decision, Question, TileKind};
use crate::game::state::{GOAL_PASSIVE, GameState, START_CASH, Status, Tier};

/// Flat cash bonus for landing exactly on the Start tile.
const START_LANDING_BONUS: i32 = 150;
/// Score bonus for landing exactly on the Start tile.
const START_LANDING_SCORE: i32 = 8;
/// Cash bonus for passing Start on a wrap.
const PAYDAY_CASH: i32 = 200;
/// Score bonus for passing Start on a wrap.
const PAYDAY_SCORE: i32 = 10;

/// Result of one roll of the three-sided die.
///
/// The game deliberately uses a 1-3 die rather than 1-6 so every turn lands
/// within a quarter of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieRoll(u8);

impl DieRoll {
    /// Lowest face.
    pub const MIN: u8 = 1;
    /// Highest face.
    pub const MAX: u8 = 3;

    /// Wraps a raw value, rejecting anything off the die.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Draws a uniform roll.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    /// Face value.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Prompt waiting on player input between `resolve_tile` and
/// `handle_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPrompt {
    /// A drawn question on a trivia, invest, or risk tile.
    Question {
        /// Which tile family drew the question (drives reward magnitudes).
        kind: TileKind,
        /// The drawn question.
        question: &'static Question,
    },
    /// A decision menu on a decision tile.
    Decision {
        /// The tile's decision, already scaled by tier.
        decision: Decision,
    },
}

/// Presentation intents emitted by engine commands.
///
/// The engine never calls into the presentation layer; it hands these back
/// for the caller to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Landed on Start: show the payday splash.
    ShowPayday {
        /// Cash granted.
        bonus: i32,
    },
    /// Show a question modal.
    ShowQuestion {
        /// Modal title.
        title: &'static str,
        /// Modal subtitle.
        description: &'static str,
        /// Tile family the question came from.
        kind: TileKind,
        /// The drawn question.
        question: &'static Question,
    },
    /// Show a decision menu.
    ShowDecision {
        /// Modal title.
        title: &'static str,
        /// The decision and its three choices.
        decision: Decision,
    },
    /// Outcome of an answered prompt.
    AnswerOutcome {
        /// Whether the answer/choice counts as a success.
        success: bool,
        /// Headline outcome text.
        message: String,
        /// Teaching note for the prompt.
        explanation: String,
    },
    /// Passive income goal reached: trigger the win sequence.
    GameWon {
        /// Final passive income.
        passive_income: i32,
        /// Final score.
        score: i32,
    },
}

/// A command was issued against a state that forbids it.
///
/// These are caller-gating bugs, not user-facing failures; the engine
/// rejects them without mutating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// The session is not in the playing state.
    #[display("game is not in progress")]
    NotPlaying,
    /// The die was already rolled this turn.
    #[display("already rolled this turn")]
    AlreadyMoved,
    /// The die has not been rolled yet this turn.
    #[display("roll the die before resolving")]
    NotMoved,
    /// The landed tile was already resolved this turn.
    #[display("tile already resolved this turn")]
    AlreadyResolved,
    /// A prompt is already showing; it must be answered first.
    #[display("a prompt is already pending")]
    PromptPending,
    /// No prompt is waiting for an answer.
    #[display("no prompt is pending")]
    NoPendingPrompt,
    /// The chosen index is outside the prompt's options.
    #[display("choice index {index} out of range for {len} options")]
    InvalidChoice {
        /// Supplied index.
        index: usize,
        /// Number of available options.
        len: usize,
    },
    /// The tile must be resolved before ending the turn.
    #[display("resolve the tile before ending the turn")]
    NotResolved,
    /// Resume was requested while the game was not paused.
    #[display("game is not paused")]
    NotPaused,
}

/// The turn-resolution engine for one play session.
///
/// Owns the [`GameState`] and the pending prompt; all mutation flows
/// through command methods.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    pending: Option<PendingPrompt>,
}

impl GameEngine {
    /// Creates an engine in the setup state.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game engine");
        Self {
            state: GameState::new(),
            pending: None,
        }
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The prompt waiting on player input, if any.
    pub fn pending_prompt(&self) -> Option<&PendingPrompt> {
        self.pending.as_ref()
    }

    /// Starts a fresh session at the given tier.
    ///
    /// Always succeeds: any in-progress state is discarded.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, tier: Tier) {
        info!(%tier, "Starting new game");
        self.state = GameState {
            status: Status::Playing,
            tier,
            logs: vec![format!(
                "Started new game ({tier}). Start Cash: ${START_CASH}."
            )],
            ..GameState::new()
        };
        self.pending = None;
    }

    /// Rolls the die and advances the player, collecting passive income and
    /// the payday bonus when passing Start.
    ///
    /// # Errors
    ///
    /// Rejected unless the game is playing and the die has not been rolled
    /// this turn.
    #[instrument(skip(self, rng))]
    pub fn roll_and_move<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<Effect>, CommandError> {
        let roll = DieRoll::roll(rng);
        self.roll_and_move_with(roll)
    }

    /// [`roll_and_move`](Self::roll_and_move) with an injected die value.
    #[instrument(skip(self), fields(roll = roll.value()))]
    pub fn roll_and_move_with(&mut self, roll: DieRoll) -> Result<Vec<Effect>, CommandError> {
        if self.state.status != Status::Playing {
            warn!(status = %self.state.status, "Roll rejected: not playing");
            return Err(CommandError::NotPlaying);
        }
        if self.state.turn_moved {
            warn!("Roll rejected: already moved this turn");
            return Err(CommandError::AlreadyMoved);
        }

        let state = &mut self.state;
        state.log(format!("🎲 Rolled {}.", roll.value()));

        let income = state.passive_income;
        state.cash += income;
        if income > 0 {
            state.log(format!("💸 Passive Income collected: +${income}"));
            state.score += (income + 9) / 10;
        }

        let mut position = state.position + roll.value();
        if position > BOARD_SIZE {
            position -= BOARD_SIZE;
            state.cash += PAYDAY_CASH;
            state.score += PAYDAY_SCORE;
            state.log(format!("✅ Passed Start: Payday +${PAYDAY_CASH}!"));
        }

        let tile = content::tile(position);
        state.log(format!("📍 Moved to tile #{position}: {}", tile.label));

        state.last_roll = Some(roll.value());
        state.position = position;
        state.turn_moved = true;
        state.turn_resolved = false;

        info!(
            roll = roll.value(),
            position,
            cash = state.cash,
            income_collected = income,
            "Player moved"
        );
        Ok(Vec::new())
    }

    /// Resolves the landed tile: grants the Start bonus outright, or draws
    /// the prompt (question or decision) the player must answer.
    ///
    /// # Errors
    ///
    /// Rejected unless the game is playing, the die was rolled, and the
    /// tile is still unresolved with no prompt showing.
    #[instrument(skip(self, rng))]
    pub fn resolve_tile<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<Effect>, CommandError> {
        let bank = content::question_bank(self.state.tier);
        let index = rng.gen_range(0..bank.len());
        self.resolve_tile_with(index)
    }

    /// [`resolve_tile`](Self::resolve_tile) with an injected question index
    /// (ignored on start and decision tiles).
    #[instrument(skip(self))]
    pub fn resolve_tile_with(&mut self, question_index: usize) -> Result<Vec<Effect>, CommandError> {
        if self.state.status != Status::Playing {
            warn!(status = %self.state.status, "Resolve rejected: not playing");
            return Err(CommandError::NotPlaying);
        }
        if !self.state.turn_moved {
            warn!("Resolve rejected: not moved yet");
            return Err(CommandError::NotMoved);
        }
        if self.state.turn_resolved {
            warn!("Resolve rejected: already resolved");
            return Err(CommandError::AlreadyResolved);
        }
        if self.pending.is_some() {
            warn!("Resolve rejected: prompt already pending");
            return Err(CommandError::PromptPending);
        }

        let tile = content::tile(self.state.position);
        debug!(tile_id = tile.id, kind = %tile.kind, "Resolving tile");

        match tile.kind {
            TileKind::Start => {
                let state = &mut self.state;
                state.cash += START_LANDING_BONUS;
                state.score += START_LANDING_SCORE;
                state.turn_resolved = true;
                state.log(format!("💰 Landed on Start! Bonus +${START_LANDING_BONUS}"));
                info!(cash = state.cash, "Start tile bonus granted");
                Ok(vec![Effect::ShowPayday {
                    bonus: START_LANDING_BONUS,
                }])
            }
            TileKind::Decision => {
                let decision = content::decision_for(tile.id, self.state.tier);
                self.pending = Some(PendingPrompt::Decision {
                    decision: decision.clone(),
                });
                info!(tile_id = tile.id, "Decision prompt drawn");
                Ok(vec![Effect::ShowDecision {
                    title: "Make a Choice",
                    decision,
                }])
            }
            TileKind::Trivia | TileKind::Invest | TileKind::Risk => {
                let bank = content::question_bank(self.state.tier);
                let question = &bank[question_index];
                let (title, description) = match tile.kind {
                    TileKind::Invest => (
                        "Investment Opportunity",
                        "Correct answer unlocks passive income!",
                    ),
                    TileKind::Risk => ("Risk Management", "Correct answer minimizes loss."),
                    _ => ("Trivia Challenge", "Answer correctly to earn cash."),
                };
                self.pending = Some(PendingPrompt::Question {
                    kind: tile.kind,
                    question,
                });
                info!(tile_id = tile.id, topic = question.topic, "Question drawn");
                Ok(vec![Effect::ShowQuestion {
                    title,
                    description,
                    kind: tile.kind,
                    question,
                }])
            }
        }
    }

    /// Applies the consequence of the pending prompt's chosen option.
    ///
    /// Decisions apply their authored deltas directly and never touch the
    /// streak. Question answers update the streak, apply the streak
    /// multiplier to the cash reward, and grant coins/xp on success. Either
    /// way the tile becomes resolved and the win condition is checked.
    ///
    /// # Errors
    ///
    /// Rejected when the game is not playing, no prompt is pending, or the
    /// index is out of range for the prompt's options.
    #[instrument(skip(self))]
    pub fn handle_answer(&mut self, choice_index: usize) -> Result<Vec<Effect>, CommandError> {
        if self.state.status != Status::Playing {
            warn!(status = %self.state.status, "Answer rejected: not playing");
            return Err(CommandError::NotPlaying);
        }
        let Some(pending) = self.pending.as_ref() else {
            warn!("Answer rejected: no pending prompt");
            return Err(CommandError::NoPendingPrompt);
        };

        let options = match pending {
            PendingPrompt::Question { question, .. } => question.answers.len(),
            PendingPrompt::Decision { decision } => decision.choices.len(),
        };
        if choice_index >= options {
            warn!(choice_index, options, "Answer rejected: index out of range");
            return Err(CommandError::InvalidChoice {
                index: choice_index,
                len: options,
            });
        }

        // Preconditions hold; consume the prompt.
        let pending = self
            .pending
            .take()
            .ok_or(CommandError::NoPendingPrompt)?;

        let outcome = match pending {
            PendingPrompt::Decision { decision } => {
                self.apply_decision(&decision, choice_index)
            }
            PendingPrompt::Question { kind, question } => {
                self.apply_question(kind, question, choice_index)
            }
        };

        self.state.turn_resolved = true;
        self.state.log(outcome.message.clone());
        if let Some(line) = &outcome.result_line {
            self.state.log(line.clone());
        }

        let mut effects = vec![Effect::AnswerOutcome {
            success: outcome.success,
            message: outcome.message,
            explanation: outcome.explanation,
        }];

        if self.state.passive_income >= GOAL_PASSIVE {
            self.state.status = Status::Won;
            info!(
                passive_income = self.state.passive_income,
                score = self.state.score,
                "Passive income goal reached"
            );
            effects.push(Effect::GameWon {
                passive_income: self.state.passive_income,
                score: self.state.score,
            });
        }

        Ok(effects)
    }

    fn apply_decision(&mut self, decision: &Decision, index: usize) -> AnswerApplied {
        let choice = &decision.choices[index];
        let state = &mut self.state;

        state.cash += choice.cash_delta;
        state.passive_income += choice.passive_delta;
        state.score = (state.score + choice.score_delta).max(0);

        let success = choice.cash_delta + choice.passive_delta >= 0 || choice.score_delta > 0;

        let mut message = format!("{} selected. ", choice.label);
        if choice.cash_delta != 0 {
            message.push_str(&format!("Cash: {}. ", fmt_signed(choice.cash_delta)));
        }
        if choice.passive_delta != 0 {
            message.push_str(&format!("Passive: {}. ", fmt_signed(choice.passive_delta)));
        }

        info!(
            choice = choice.label,
            cash = state.cash,
            passive_income = state.passive_income,
            score = state.score,
            success,
            "Decision applied"
        );

        AnswerApplied {
            success,
            message,
            explanation: choice.explanation.to_string(),
            result_line: Some(choice.result_line.render(state.cash, choice.passive_delta)),
        }
    }

    fn apply_question(
        &mut self,
        kind: TileKind,
        question: &'static Question,
        index: usize,
    ) -> AnswerApplied {
        let correct = index == question.correct;
        let state = &mut self.state;

        let (base_cash, passive_delta, message) = if correct {
            match kind {
                TileKind::Invest => (
                    90,
                    content::invest_passive_reward(state.tier),
                    "Correct! You secured the investment.",
                ),
                TileKind::Risk => (70, 0, "Correct! You managed the risk well."),
                _ => (120, 0, "Correct! Knowledge pays off."),
            }
        } else {
            match kind {
                TileKind::Risk => (-140, 0, "Incorrect. The risk event hit hard."),
                _ => (-80, 0, "Incorrect. Missed opportunity."),
            }
        };
        let score_delta = if correct { 15 } else { -8 };

        // Streak updates before the multiplier: the reward scales with the
        // streak including this answer.
        state.streak = if correct { state.streak + 1 } else { 0 };
        state.best_streak = state.best_streak.max(state.streak);

        let multiplier = 1.0 + (f64::from(state.streak) * 0.10).min(1.0);
        let cash_gain = (f64::from(base_cash) * multiplier).round() as i32;

        state.cash += cash_gain;
        state.passive_income += passive_delta;
        state.score = (state.score + score_delta).max(0);
        if correct {
            state.coins += 5 + state.streak.min(20);
            state.xp += 10;
        }

        info!(
            correct,
            kind = %kind,
            streak = state.streak,
            multiplier,
            cash_gain,
            passive_delta,
            cash = state.cash,
            score = state.score,
            "Question answered"
        );

        AnswerApplied {
            success: correct,
            message: message.to_string(),
            explanation: question.explanation.to_string(),
            result_line: None,
        }
    }

    /// Ends the turn, clearing the roll and the turn flags.
    ///
    /// # Errors
    ///
    /// Rejected until the landed tile has been resolved; calling with an
    /// unresolved turn changes nothing.
    #[instrument(skip(self))]
    pub fn end_turn(&mut self) -> Result<(), CommandError> {
        if !self.state.turn_resolved {
            warn!("End turn rejected: tile not resolved");
            return Err(CommandError::NotResolved);
        }
        self.state.last_roll = None;
        self.state.turn_moved = false;
        self.state.turn_resolved = false;
        self.pending = None;
        self.state.log("--- Turn Ended ---");
        debug!("Turn ended");
        Ok(())
    }

    /// Freezes a playing session.
    ///
    /// # Errors
    ///
    /// Rejected from any state other than playing.
    #[instrument(skip(self))]
    pub fn pause_game(&mut self) -> Result<(), CommandError> {
        if self.state.status != Status::Playing {
            warn!(status = %self.state.status, "Pause rejected");
            return Err(CommandError::NotPlaying);
        }
        self.state.status = Status::Paused;
        info!("Game paused");
        Ok(())
    }

    /// Resumes a paused session.
    ///
    /// # Errors
    ///
    /// Rejected unless the game is paused.
    #[instrument(skip(self))]
    pub fn resume_game(&mut self) -> Result<(), CommandError> {
        if self.state.status != Status::Paused {
            warn!(status = %self.state.status, "Resume rejected");
            return Err(CommandError::NotPaused);
        }
        self.state.status = Status::Playing;
        info!("Game resumed");
        Ok(())
    }

    /// Abandons the session and returns to setup. No persistence happens.
    #[instrument(skip(self))]
    pub fn quit_game(&mut self) {
        info!(status = %self.state.status, "Quitting to setup");
        self.state.status = Status::Setup;
        self.pending = None;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal result of applying an answer or choice.
struct AnswerApplied {
    success: bool,
    message: String,
    explanation: String,
    result_line: Option<String>,
}

fn fmt_signed(n: i32) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}
