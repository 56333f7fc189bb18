//! Tests for the turn-resolution engine.

use rand::SeedableRng;
use rand::rngs::StdRng;

use wealth_quest::{
    CommandError, DieRoll, Effect, GameEngine, PendingPrompt, Status, Tier, format_money,
};

/// Starts a fresh playing session at the given tier.
fn playing(tier: Tier) -> GameEngine {
    let mut engine = GameEngine::new();
    engine.start_game(tier);
    engine
}

/// Answers the pending prompt: the correct index for questions, the first
/// choice for decisions.
fn answer_correctly(engine: &mut GameEngine) -> Vec<Effect> {
    let index = match engine.pending_prompt().expect("Expected a pending prompt") {
        PendingPrompt::Question { question, .. } => question.correct,
        PendingPrompt::Decision { .. } => 0,
    };
    engine.handle_answer(index).expect("Answer failed")
}

/// Plays one full turn with a fixed die value, answering any prompt
/// correctly.
fn play_turn(engine: &mut GameEngine, roll: u8) {
    engine
        .roll_and_move_with(DieRoll::new(roll).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    if engine.pending_prompt().is_some() {
        answer_correctly(engine);
    }
    engine.end_turn().expect("End turn failed");
}

#[test]
fn test_new_engine_in_setup() {
    let engine = GameEngine::new();
    let state = engine.state();
    assert_eq!(state.status(), &Status::Setup);
    assert_eq!(state.position(), &1);
    assert_eq!(state.cash(), &500);
    assert_eq!(state.passive_income(), &0);
    assert_eq!(state.score(), &0);
    assert!(state.logs()[0].contains("Welcome to Wealth Quest"));
}

#[test]
fn test_start_game_resets_state() {
    let mut engine = GameEngine::new();
    engine.start_game(Tier::Kids);
    // Dirty the session, then restart at another tier.
    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");
    engine.start_game(Tier::Adults);

    let state = engine.state();
    assert_eq!(state.status(), &Status::Playing);
    assert_eq!(state.tier(), &Tier::Adults);
    assert_eq!(state.position(), &1);
    assert_eq!(state.cash(), &500);
    assert_eq!(state.turn_moved(), &false);
    assert_eq!(
        state.logs(),
        &vec!["Started new game (adults). Start Cash: $500.".to_string()]
    );
}

#[test]
fn test_roll_moves_and_logs() {
    let mut engine = playing(Tier::Teens);
    let effects = engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");
    assert!(effects.is_empty());

    let state = engine.state();
    assert_eq!(state.position(), &3);
    assert_eq!(state.last_roll(), &Some(2));
    assert_eq!(state.turn_moved(), &true);
    assert_eq!(state.turn_resolved(), &false);
    assert!(state.logs().iter().any(|l| l == "🎲 Rolled 2."));
    assert!(
        state
            .logs()
            .iter()
            .any(|l| l == "📍 Moved to tile #3: Start a Business")
    );
    // No passive income yet, so no collection line.
    assert!(!state.logs().iter().any(|l| l.contains("Passive Income")));
}

#[test]
fn test_roll_twice_rejected() {
    let mut engine = playing(Tier::Teens);
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("First roll failed");
    let err = engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect_err("Second roll should be rejected");
    assert_eq!(err, CommandError::AlreadyMoved);
}

#[test]
fn test_commands_rejected_in_setup() {
    let mut engine = GameEngine::new();
    let die = DieRoll::new(1).expect("Bad die value");
    assert_eq!(
        engine.roll_and_move_with(die),
        Err(CommandError::NotPlaying)
    );
    assert_eq!(engine.resolve_tile_with(0), Err(CommandError::NotPlaying));
    assert_eq!(engine.handle_answer(0), Err(CommandError::NotPlaying));
    assert_eq!(engine.pause_game(), Err(CommandError::NotPlaying));
}

#[test]
fn test_passive_income_collected_on_roll() {
    let mut engine = playing(Tier::Teens);
    // Reach the invest tile at #5 and unlock 35 passive income.
    play_turn(&mut engine, 3);
    play_turn(&mut engine, 1);
    assert_eq!(engine.state().passive_income(), &35);

    let cash_before = *engine.state().cash();
    let score_before = *engine.state().score();
    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");

    let state = engine.state();
    assert_eq!(*state.cash(), cash_before + 35);
    // Score gains ceil(35 / 10) = 4 on collection.
    assert_eq!(*state.score(), score_before + 4);
    assert!(
        state
            .logs()
            .iter()
            .any(|l| l == "💸 Passive Income collected: +$35")
    );
}

#[test]
fn test_payday_on_wrap() {
    let mut engine = playing(Tier::Teens);
    // Walk to tile #11: 1 -> 4 -> 7 -> 10 -> 11.
    for roll in [3, 3, 3, 1] {
        play_turn(&mut engine, roll);
    }
    assert_eq!(engine.state().position(), &11);

    let cash_before = *engine.state().cash();
    let score_before = *engine.state().score();
    let passive = *engine.state().passive_income();
    engine
        .roll_and_move_with(DieRoll::new(3).expect("Bad die value"))
        .expect("Roll failed");

    let state = engine.state();
    assert_eq!(state.position(), &2);
    assert_eq!(*state.cash(), cash_before + passive + 200);
    assert_eq!(*state.score(), score_before + (passive + 9) / 10 + 10);
    assert!(
        state
            .logs()
            .iter()
            .any(|l| l == "✅ Passed Start: Payday +$200!")
    );
}

#[test]
fn test_start_landing_bonus() {
    let mut engine = playing(Tier::Teens);
    // Walk to tile #10: 1 -> 2 -> 4 -> 7 -> 10, then land exactly on Start.
    for roll in [1, 2, 3, 3] {
        play_turn(&mut engine, roll);
    }
    engine
        .roll_and_move_with(DieRoll::new(3).expect("Bad die value"))
        .expect("Roll failed");
    assert_eq!(engine.state().position(), &1);

    let cash_before = *engine.state().cash();
    let score_before = *engine.state().score();
    let effects = engine.resolve_tile_with(0).expect("Resolve failed");

    assert_eq!(effects, vec![Effect::ShowPayday { bonus: 150 }]);
    let state = engine.state();
    assert_eq!(*state.cash(), cash_before + 150);
    assert_eq!(*state.score(), score_before + 8);
    assert_eq!(state.turn_resolved(), &true);
    assert!(engine.pending_prompt().is_none());
    assert!(
        state
            .logs()
            .iter()
            .any(|l| l == "💰 Landed on Start! Bonus +$150")
    );

    // Start resolves outright; there is nothing to answer.
    assert_eq!(engine.handle_answer(0), Err(CommandError::NoPendingPrompt));
    engine.end_turn().expect("End turn failed");
}

#[test]
fn test_streak_multiplier_applies_to_cash() {
    let mut engine = playing(Tier::Teens);

    // Trivia at #2: streak 1, 120 * 1.1 = 132.
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    answer_correctly(&mut engine);
    assert_eq!(engine.state().cash(), &632);
    assert_eq!(engine.state().streak(), &1);
    engine.end_turn().expect("End turn failed");

    // Trivia at #4: streak 2, 120 * 1.2 = 144.
    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    answer_correctly(&mut engine);
    assert_eq!(engine.state().cash(), &776);
    engine.end_turn().expect("End turn failed");

    // Invest at #7: streak 3, 90 * 1.3 = 117.
    engine
        .roll_and_move_with(DieRoll::new(3).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    answer_correctly(&mut engine);

    let state = engine.state();
    assert_eq!(state.cash(), &893);
    assert_eq!(state.passive_income(), &35);
    assert_eq!(state.streak(), &3);
    assert_eq!(state.best_streak(), &3);
    assert_eq!(state.score(), &45);
    // Coins: (5+1) + (5+2) + (5+3); xp: 10 per correct answer.
    assert_eq!(state.coins(), &21);
    assert_eq!(state.xp(), &30);
}

#[test]
fn test_streak_multiplier_caps_at_two() {
    let mut engine = playing(Tier::Teens);
    // Ten correct answers across question tiles:
    // 2, 4, 5, 7, 8, 9, 10, 11, (wrap) 2, 4.
    for roll in [1, 2, 1, 2, 1, 1, 1, 1, 3, 2] {
        play_turn(&mut engine, roll);
    }
    assert_eq!(engine.state().streak(), &10);

    // Eleventh correct answer at invest tile #5: multiplier stays 2.0,
    // so the gain is 90 * 2 = 180.
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    let cash_before = *engine.state().cash();
    answer_correctly(&mut engine);

    assert_eq!(*engine.state().cash(), cash_before + 180);
    assert_eq!(engine.state().streak(), &11);
}

#[test]
fn test_incorrect_answer_penalties_and_score_floor() {
    let mut engine = playing(Tier::Teens);

    // Trivia at #4, wrong answer: -80 cash, score floored at 0.
    engine
        .roll_and_move_with(DieRoll::new(3).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    let effects = engine.handle_answer(1).expect("Answer failed");
    assert_eq!(engine.state().cash(), &420);
    assert_eq!(engine.state().score(), &0);
    assert!(matches!(
        effects[0],
        Effect::AnswerOutcome { success: false, .. }
    ));
    engine.end_turn().expect("End turn failed");

    // Invest at #7, wrong answer: same -80 penalty, no passive income.
    engine
        .roll_and_move_with(DieRoll::new(3).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    engine.handle_answer(1).expect("Answer failed");
    assert_eq!(engine.state().cash(), &340);
    assert_eq!(engine.state().passive_income(), &0);
    engine.end_turn().expect("End turn failed");

    // Risk at #8, wrong answer: the harsher -140 penalty.
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    let effects = engine.handle_answer(1).expect("Answer failed");
    assert_eq!(engine.state().cash(), &200);
    assert_eq!(engine.state().score(), &0);
    assert_eq!(engine.state().coins(), &0);
    assert_eq!(engine.state().xp(), &0);
    assert!(matches!(
        &effects[0],
        Effect::AnswerOutcome { message, .. } if message == "Incorrect. The risk event hit hard."
    ));
}

#[test]
fn test_streak_resets_on_incorrect() {
    let mut engine = playing(Tier::Teens);

    // Correct at #2.
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    answer_correctly(&mut engine);
    assert_eq!(engine.state().streak(), &1);
    engine.end_turn().expect("End turn failed");

    // Wrong at #4: streak resets, best streak stays.
    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    engine.handle_answer(1).expect("Answer failed");
    assert_eq!(engine.state().streak(), &0);
    assert_eq!(engine.state().best_streak(), &1);
    engine.end_turn().expect("End turn failed");

    // Correct at #5: streak rebuilds from 1, so 90 * 1.1 = 99.
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    let cash_before = *engine.state().cash();
    answer_correctly(&mut engine);
    assert_eq!(*engine.state().cash(), cash_before + 99);
    assert_eq!(engine.state().streak(), &1);
}

#[test]
fn test_decision_choice_applies_deltas() {
    let mut engine = playing(Tier::Teens);
    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");

    let effects = engine.resolve_tile_with(0).expect("Resolve failed");
    assert!(matches!(
        &effects[0],
        Effect::ShowDecision { title, .. } if *title == "Make a Choice"
    ));
    assert!(matches!(
        engine.pending_prompt(),
        Some(PendingPrompt::Decision { .. })
    ));

    // "Start a simple service": -120 cash, +20 passive (teens), +12 score.
    let effects = engine.handle_answer(0).expect("Answer failed");
    let state = engine.state();
    assert_eq!(state.cash(), &380);
    assert_eq!(state.passive_income(), &20);
    assert_eq!(state.score(), &12);
    // Decisions never touch the streak.
    assert_eq!(state.streak(), &0);
    assert_eq!(state.coins(), &0);
    assert!(matches!(
        effects[0],
        Effect::AnswerOutcome { success: true, .. }
    ));
    assert!(
        state
            .logs()
            .iter()
            .any(|l| l == "✅ You started small. Cash $380. Passive +$20.")
    );
}

#[test]
fn test_decision_costly_choice_flags_failure() {
    let mut engine = playing(Tier::Teens);
    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");

    // "Buy expensive gear with no plan": -220 cash, -6 score (floored).
    let effects = engine.handle_answer(1).expect("Answer failed");
    let state = engine.state();
    assert_eq!(state.cash(), &280);
    assert_eq!(state.passive_income(), &0);
    assert_eq!(state.score(), &0);
    assert!(matches!(
        effects[0],
        Effect::AnswerOutcome { success: false, .. }
    ));
}

#[test]
fn test_invest_reward_scales_with_tier() {
    for (tier, expected) in [(Tier::Kids, 20), (Tier::Teens, 35), (Tier::Adults, 50)] {
        let mut engine = playing(tier);
        // Trivia at #4, then the invest tile at #5.
        play_turn(&mut engine, 3);
        engine
            .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
            .expect("Roll failed");
        engine.resolve_tile_with(0).expect("Resolve failed");
        answer_correctly(&mut engine);
        assert_eq!(
            *engine.state().passive_income(),
            expected,
            "Wrong invest reward for {tier}"
        );
    }
}

#[test]
fn test_win_when_passive_goal_reached() {
    let mut engine = playing(Tier::Adults);
    // Four correct invest answers at 50 each: tiles 5, 7, then lap to 5.
    for roll in [3, 1, 2, 3, 1, 3, 3] {
        play_turn(&mut engine, roll);
    }
    assert_eq!(engine.state().passive_income(), &150);

    engine
        .roll_and_move_with(DieRoll::new(2).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");
    let effects = answer_correctly(&mut engine);

    // The win fires immediately on the answer, before the turn ends.
    assert_eq!(engine.state().status(), &Status::Won);
    assert_eq!(engine.state().passive_income(), &200);
    assert!(matches!(effects[0], Effect::AnswerOutcome { .. }));
    assert!(matches!(
        effects[1],
        Effect::GameWon {
            passive_income: 200,
            ..
        }
    ));

    // No further turn commands once won.
    let die = DieRoll::new(1).expect("Bad die value");
    assert_eq!(
        engine.roll_and_move_with(die),
        Err(CommandError::NotPlaying)
    );
    assert_eq!(engine.resolve_tile_with(0), Err(CommandError::NotPlaying));
}

#[test]
fn test_resolve_gating() {
    let mut engine = playing(Tier::Teens);
    assert_eq!(engine.resolve_tile_with(0), Err(CommandError::NotMoved));

    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");

    // A prompt is showing: resolving again is rejected.
    assert_eq!(engine.resolve_tile_with(0), Err(CommandError::PromptPending));

    answer_correctly(&mut engine);
    assert_eq!(
        engine.resolve_tile_with(0),
        Err(CommandError::AlreadyResolved)
    );
}

#[test]
fn test_answer_gating() {
    let mut engine = playing(Tier::Teens);
    assert_eq!(engine.handle_answer(0), Err(CommandError::NoPendingPrompt));

    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");

    // An out-of-range index rejects without consuming the prompt.
    assert_eq!(
        engine.handle_answer(9),
        Err(CommandError::InvalidChoice { index: 9, len: 3 })
    );
    assert!(engine.pending_prompt().is_some());
    assert_eq!(engine.state().turn_resolved(), &false);

    answer_correctly(&mut engine);
    assert_eq!(engine.state().turn_resolved(), &true);
}

#[test]
fn test_end_turn_requires_resolution() {
    let mut engine = playing(Tier::Teens);
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    assert_eq!(engine.end_turn(), Err(CommandError::NotResolved));

    engine.resolve_tile_with(0).expect("Resolve failed");
    answer_correctly(&mut engine);
    // A resolved tile is always a moved tile.
    assert_eq!(engine.state().turn_moved(), &true);
    assert_eq!(engine.state().turn_resolved(), &true);

    engine.end_turn().expect("End turn failed");
    let state = engine.state();
    assert_eq!(state.last_roll(), &None);
    assert_eq!(state.turn_moved(), &false);
    assert_eq!(state.turn_resolved(), &false);
    assert!(state.logs().iter().any(|l| l == "--- Turn Ended ---"));
}

#[test]
fn test_pause_and_resume() {
    let mut engine = playing(Tier::Teens);
    engine.pause_game().expect("Pause failed");
    assert_eq!(engine.state().status(), &Status::Paused);

    let die = DieRoll::new(1).expect("Bad die value");
    assert_eq!(
        engine.roll_and_move_with(die),
        Err(CommandError::NotPlaying)
    );

    engine.resume_game().expect("Resume failed");
    assert_eq!(engine.state().status(), &Status::Playing);
    engine.roll_and_move_with(die).expect("Roll failed");

    assert_eq!(engine.resume_game(), Err(CommandError::NotPaused));
}

#[test]
fn test_quit_returns_to_setup() {
    let mut engine = playing(Tier::Teens);
    engine
        .roll_and_move_with(DieRoll::new(1).expect("Bad die value"))
        .expect("Roll failed");
    engine.resolve_tile_with(0).expect("Resolve failed");

    engine.quit_game();
    assert_eq!(engine.state().status(), &Status::Setup);
    assert!(engine.pending_prompt().is_none());
}

#[test]
fn test_die_roll_bounds() {
    assert!(DieRoll::new(0).is_none());
    assert!(DieRoll::new(4).is_none());
    for value in 1..=3 {
        assert_eq!(DieRoll::new(value).map(DieRoll::value), Some(value));
    }

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let roll = DieRoll::roll(&mut rng).value();
        assert!((1..=3).contains(&roll), "Die rolled off-face: {roll}");
    }
}

#[test]
fn test_random_roll_and_move() {
    let mut engine = playing(Tier::Teens);
    let mut rng = StdRng::seed_from_u64(42);
    engine.roll_and_move(&mut rng).expect("Roll failed");

    let position = *engine.state().position();
    assert!((2..=4).contains(&position));
    assert_eq!(engine.state().turn_moved(), &true);
}

#[test]
fn test_format_money() {
    assert_eq!(format_money(0), "$0");
    assert_eq!(format_money(80), "$80");
    assert_eq!(format_money(500), "$500");
    assert_eq!(format_money(1234), "$1,234");
    assert_eq!(format_money(-80), "$80");
    assert_eq!(format_money(1_000_000), "$1,000,000");
}
