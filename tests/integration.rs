// Integration tests (native) for the `number-drill` crate.
// These tests avoid wasm-specific functionality and drive the game controller
// through complete games with a seeded RNG.

use number_drill::{
    DrillError, Feedback, GameConfig, GameController, GamePhase, Report, category_by_name,
    chinese_reading,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn config(len: usize) -> GameConfig {
    GameConfig {
        game_length: len,
        feedback_duration_ms: 1000.0,
        ..GameConfig::default()
    }
}

#[test]
fn full_game_produces_report() {
    let mut game = GameController::new(config(5));
    let mut rng = StdRng::seed_from_u64(42);
    let mut now = 0.0;
    game.start(&mut rng, now);

    let mut expected_correct = 0;
    let mut i = 0;
    while game.phase() == GamePhase::Playing {
        game.mark_shown(now);
        let prompt = game.current_prompt().unwrap().clone();
        assert!(category_by_name(&prompt.category).is_some());
        // every other prompt is answered wrong
        let typed = if i % 2 == 0 {
            expected_correct += 1;
            prompt.answer.to_string()
        } else {
            (prompt.answer + 1).to_string()
        };
        let spent = 1000.0 * (i + 1) as f64;
        now += spent;
        let fb = game.submit_answer(&typed, spent, now).unwrap();
        assert_eq!(fb == Feedback::Correct, i % 2 == 0);
        now += 1000.0;
        assert!(game.tick(now));
        i += 1;
    }

    assert_eq!(game.phase(), GamePhase::Finished);
    let stats = game.stats();
    assert_eq!(stats.total_count, 5);
    assert_eq!(stats.correct_count, expected_correct);
    assert_eq!(stats.total_time, 15_000.0);
    assert_eq!(stats.average_time, 3000.0);
    assert_eq!(stats.longest_time, 5000.0);
    assert_eq!(stats.shortest_time, 1000.0);

    let report = Report::new(game.prompts());
    assert_eq!(report.rows.len(), 5);
    assert_eq!(report.shortest_correct_time, Some(1000.0));
    assert!(report.rows.iter().all(|r| r.time_spent.is_some()));

    game.play_again().unwrap();
    assert_eq!(game.phase(), GamePhase::Start);
}

#[test]
fn prompts_are_timestamped_once_and_in_order() {
    let mut game = GameController::new(config(3));
    game.start(&mut StdRng::seed_from_u64(1), 0.0);
    game.mark_shown(10.0);
    game.replay().unwrap();
    game.mark_shown(20.0);
    game.submit_answer("", 5.0, 30.0).unwrap();
    game.tick(1030.0);
    game.mark_shown(1030.0);
    assert_eq!(game.prompts()[0].start_time, Some(10.0));
    assert_eq!(game.prompts()[0].replay_count, 1);
    assert_eq!(game.prompts()[1].start_time, Some(1030.0));
    assert_eq!(game.prompts()[2].start_time, None);
}

#[test]
fn submitting_before_start_is_rejected() {
    let mut game = GameController::new(config(3));
    assert!(matches!(
        game.submit_answer("1", 1.0, 1.0),
        Err(DrillError::WrongPhase { expected: GamePhase::Playing, actual: GamePhase::Start })
    ));
}

#[test]
fn restart_replaces_batch() {
    let mut game = GameController::new(config(3));
    game.start(&mut StdRng::seed_from_u64(1), 100.0);
    game.submit_answer("1", 1.0, 101.0).unwrap();
    game.start(&mut StdRng::seed_from_u64(2), 200.0);
    assert_eq!(game.index(), 0);
    assert_eq!(game.feedback(), Feedback::None);
    assert!(game.prompts().iter().all(|p| p.end_time.is_none()));
    assert!(game.prompts()[0].id.ends_with("-200"));
}

#[test]
fn config_json_round_trips_through_controller() {
    let cfg = GameConfig::from_json(r#"{"game_length": 2, "feedback_duration_ms": 250}"#).unwrap();
    let mut game = GameController::new(cfg);
    game.start(&mut StdRng::seed_from_u64(9), 0.0);
    assert_eq!(game.prompts().len(), 2);
    game.submit_answer("x", 1.0, 0.0).unwrap();
    assert!(!game.tick(249.0));
    assert!(game.tick(250.0));
}

#[test]
fn chinese_reading_export() {
    assert_eq!(chinese_reading(2024), "二千零二十四");
}
