use cubesim_core::notation::{EmptyInputError, InvalidMoveError, parse_move};
use cubesim_core::{Axis, Pos};
use cubesim_prefs::AnimationPreferences;
use cubesim_view::{CubeEngine, EngineError, EnqueueOptions, SolveOutcome, TurnState};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn slow_prefs() -> AnimationPreferences {
    AnimationPreferences {
        twist_duration: 0.2,
        dynamic_twist_speed: false,
        ..Default::default()
    }
}

/// Steps the engine frame by frame until every turn has completed. Returns
/// the number of frames.
fn run_to_idle(engine: &mut CubeEngine, prefs: &AnimationPreferences) -> usize {
    let mut frames = 0;
    while engine.pending_len() > 0 {
        engine.step(FRAME, prefs);
        frames += 1;
        assert!(frames < 100_000, "engine never became idle");
    }
    frames
}

fn solver_returning(solution: &str) -> impl FnMut(&cubesim_core::CubieSet) -> eyre::Result<String> {
    move |_| Ok(solution.to_owned())
}

fn positions(engine: &CubeEngine) -> Vec<Pos> {
    engine.cubies().iter().map(|c| c.position).collect()
}

#[test]
fn test_solved_on_construction_and_reset() {
    let mut engine = CubeEngine::new();
    assert!(engine.is_solved());
    engine.enqueue(["R"], EnqueueOptions::default());
    engine.flush();
    assert!(!engine.is_solved());
    engine.reset();
    assert!(engine.is_solved());
    assert!(engine.move_log().is_empty());
    assert_eq!(engine.move_count(), 0);
}

#[test]
fn test_single_turn_is_not_solved() {
    for mv in cubesim_core::Move::ALL {
        let token = mv.to_string();
        let mut engine = CubeEngine::new();
        engine.enqueue([&token], EnqueueOptions::default());
        run_to_idle(&mut engine, &slow_prefs());
        assert!(!engine.is_solved(), "{token}");
        assert_eq!(engine.move_log_tokens(), [token]);
    }
}

#[test]
fn test_r_permutes_right_layer() {
    let mut engine = CubeEngine::new();
    let before = engine.cubies().clone();
    engine.enqueue(["R"], EnqueueOptions::default());
    run_to_idle(&mut engine, &slow_prefs());

    let mut layer_before = vec![];
    let mut layer_after = vec![];
    for (old, new) in before.iter().zip(engine.cubies().iter()) {
        if old.position.x == 1 {
            assert_eq!(new.position, old.position.rotated(Axis::X, 1));
            layer_before.push(old.position);
            layer_after.push(new.position);
        } else {
            assert_eq!(new.position, old.position);
        }
    }
    layer_before.sort();
    layer_after.sort();
    assert_eq!(layer_before.len(), 9);
    assert_eq!(layer_before, layer_after);
    assert_eq!(engine.move_log_tokens(), ["R"]);
}

#[test]
fn test_turn_then_inverse_restores() {
    for token in ["R", "U'", "F2", "B", "L'", "D2"] {
        let mut engine = CubeEngine::new();
        engine.enqueue(["R", "U"], EnqueueOptions::default());
        engine.flush();
        let before = positions(&engine);

        engine.enqueue([token], EnqueueOptions::default());
        engine.enqueue([engine.invert(token)], EnqueueOptions::NO_LOG);
        run_to_idle(&mut engine, &slow_prefs());
        assert_eq!(positions(&engine), before, "{token}");
        assert_eq!(engine.move_log_tokens(), ["R", "U", token]);
    }
}

#[test]
fn test_sexy_move_six_times() {
    let mut engine = CubeEngine::new();
    for i in 1..=6 {
        engine.enqueue_str("R U R' U'", EnqueueOptions::default());
        run_to_idle(&mut engine, &slow_prefs());
        assert_eq!(engine.is_solved(), i == 6, "after {i} repetitions");
    }
    assert!(engine.cubies().is_fully_solved());
    assert_eq!(engine.move_count(), 24);
    assert_eq!(engine.move_log().len(), 24);
}

#[test]
fn test_invalid_tokens_are_dropped() {
    let mut engine = CubeEngine::new();
    let report = engine.enqueue(["R", "X", "U3", "", "F'"], EnqueueOptions::default());
    assert_eq!(
        report.accepted,
        ["R", "F'"].map(|t| parse_move(t).unwrap()),
    );
    assert_eq!(
        report.rejected,
        [
            ("X".to_owned(), InvalidMoveError::BadFace('X')),
            ("U3".to_owned(), InvalidMoveError::BadModifier('3')),
            (String::new(), InvalidMoveError::Empty),
        ],
    );
    engine.flush();
    assert_eq!(engine.move_log_tokens(), ["R", "F'"]);
}

#[test]
fn test_turns_apply_one_at_a_time_in_order() {
    let prefs = slow_prefs();
    let mut engine = CubeEngine::new();
    engine.enqueue_str("R U", EnqueueOptions::default());
    assert!(engine.is_busy());
    assert_eq!(engine.pending_len(), 2);

    // Nothing changes until the first turn finishes animating.
    engine.step(FRAME, &prefs);
    assert!(engine.is_solved());
    assert!(matches!(engine.turn_state(), TurnState::Animating(_)));

    while engine.move_count() == 0 {
        engine.step(FRAME, &prefs);
    }
    let mut expected = cubesim_core::CubieSet::new();
    expected.do_move(parse_move("R").unwrap());
    assert_eq!(engine.cubies(), &expected);
    match engine.turn_state() {
        TurnState::Animating(active) => assert_eq!(active.turn.mv, parse_move("U").unwrap()),
        other => panic!("expected U to be animating, got {other:?}"),
    }

    run_to_idle(&mut engine, &prefs);
    expected.do_move(parse_move("U").unwrap());
    assert_eq!(engine.cubies(), &expected);
    assert_eq!(engine.move_log_tokens(), ["R", "U"]);
}

#[test]
fn test_request_during_animation_is_queued() {
    let prefs = slow_prefs();
    let mut engine = CubeEngine::with_scramble_seed("queued");
    engine.enqueue(["F"], EnqueueOptions::default());
    engine.step(FRAME, &prefs);
    assert!(engine.is_busy());

    let report = engine.scramble_and_enqueue(10);
    assert_eq!(report.accepted.len(), 10);
    assert_eq!(engine.pending_len(), 11);
    run_to_idle(&mut engine, &prefs);
    assert_eq!(engine.move_count(), 11);
    assert_eq!(engine.move_log()[0], parse_move("F").unwrap());
}

#[test]
fn test_reset_during_animation() {
    let prefs = slow_prefs();
    let mut engine = CubeEngine::new();
    engine.enqueue_str("R U F", EnqueueOptions::default());
    engine.flush();
    engine.enqueue_str("D L B", EnqueueOptions::default());
    engine.step(FRAME, &prefs);
    assert!(engine.is_busy());

    engine.reset();
    assert!(!engine.is_busy());
    assert_eq!(engine.pending_len(), 0);
    assert!(engine.cubies().is_fully_solved());
    assert!(engine.move_log().is_empty());
    assert!(!engine.step(FRAME, &prefs));
    assert_eq!(engine.render_data(), CubeEngine::new().render_data());
}

#[test]
fn test_scramble() {
    let mut engine = CubeEngine::with_scramble_seed("scramble");
    for _ in 0..20 {
        let tokens = engine.scramble(25);
        assert_eq!(tokens.len(), 25);
        let moves: Vec<_> = tokens.iter().map(|t| parse_move(t).unwrap()).collect();
        for pair in moves.windows(2) {
            assert_ne!(pair[0].axis(), pair[1].axis());
        }
    }
    assert!(engine.is_solved());

    let mut a = CubeEngine::with_scramble_seed("same");
    let mut b = CubeEngine::with_scramble_seed("same");
    assert_eq!(a.scramble(30), b.scramble(30));
}

#[test]
fn test_scramble_retry_budget() {
    let mut engine = CubeEngine::with_scramble_seed("budget");
    engine.set_scramble_retries(0);
    assert!(engine.scramble(500).len() < 500);
}

#[test]
fn test_undo() {
    let mut engine = CubeEngine::new();
    assert_eq!(engine.undo(), Err(EngineError::EmptyInput(EmptyInputError)));

    engine.enqueue_str("R U", EnqueueOptions::default());
    engine.flush();
    let after_r = {
        let mut c = cubesim_core::CubieSet::new();
        c.do_move(parse_move("R").unwrap());
        c
    };

    assert_eq!(engine.undo(), Ok(parse_move("U'").unwrap()));
    assert_eq!(engine.move_log_tokens(), ["R"]);
    engine.flush();
    assert_eq!(engine.cubies(), &after_r);
    assert_eq!(engine.move_log_tokens(), ["R"]);

    assert_eq!(engine.undo(), Ok(parse_move("R'").unwrap()));
    engine.flush();
    assert!(engine.cubies().is_fully_solved());
    assert!(engine.move_log().is_empty());
    assert!(engine.undo().is_err());
}

#[test]
fn test_undo_pending_turn() {
    let prefs = slow_prefs();
    let mut engine = CubeEngine::new();
    engine.enqueue_str("R F2", EnqueueOptions::default());
    engine.step(FRAME, &prefs);

    assert_eq!(engine.undo(), Ok(parse_move("F2").unwrap()));
    run_to_idle(&mut engine, &prefs);
    assert_eq!(engine.move_log_tokens(), ["R"]);
    let mut expected = cubesim_core::CubieSet::new();
    expected.do_move(parse_move("R").unwrap());
    assert_eq!(engine.cubies(), &expected);
}

#[test]
fn test_solve() {
    let mut engine = CubeEngine::with_scramble_seed("solve");
    assert_eq!(engine.solve(), Ok(SolveOutcome::AlreadySolved));

    engine.scramble_and_enqueue(25);
    engine.flush();
    assert!(!engine.is_solved());
    let log = engine.move_log().to_vec();

    let Ok(SolveOutcome::Queued(inverse)) = engine.solve() else {
        panic!("expected solution to be queued");
    };
    assert_eq!(inverse.len(), log.len());
    assert_eq!(inverse[0], log[log.len() - 1].inv());
    assert!(engine.move_log().is_empty());
    run_to_idle(&mut engine, &AnimationPreferences::default());
    assert!(engine.cubies().is_fully_solved());
    assert!(engine.move_log().is_empty());
}

#[test]
fn test_solve_includes_pending_turns() {
    let prefs = slow_prefs();
    let mut engine = CubeEngine::new();
    engine.enqueue_str("R U F", EnqueueOptions::default());
    engine.step(FRAME, &prefs);
    assert!(matches!(engine.solve(), Ok(SolveOutcome::Queued(_))));
    run_to_idle(&mut engine, &prefs);
    assert!(engine.is_solved());
    assert!(engine.move_log().is_empty());
}

#[test]
fn test_solve_without_history() {
    let mut engine = CubeEngine::new();
    engine.enqueue(["R"], EnqueueOptions::NO_LOG);
    engine.flush();
    assert_eq!(engine.solve(), Err(EngineError::EmptyInput(EmptyInputError)));
}

#[test]
fn test_external_solver() {
    let mut engine = CubeEngine::new();
    engine.enqueue_str("R U", EnqueueOptions::default());
    assert_eq!(
        engine
            .enqueue_external_solution(&mut solver_returning("U' R'"))
            .unwrap_err(),
        EngineError::Busy,
    );
    engine.flush();

    let report = engine
        .enqueue_external_solution(&mut solver_returning("U' bogus R'"))
        .expect("solution should be accepted");
    assert_eq!(report.accepted.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    engine.flush();
    assert!(engine.is_solved());

    let err = engine
        .enqueue_external_solution(&mut |_: &cubesim_core::CubieSet| -> eyre::Result<String> {
            Err(eyre::eyre!("no solver installed"))
        })
        .unwrap_err();
    assert_eq!(err, EngineError::Solver("no solver installed".to_owned()));

    let err = engine
        .enqueue_external_solution(&mut solver_returning("   "))
        .unwrap_err();
    assert_eq!(err, EngineError::EmptyInput(EmptyInputError));
}

#[test]
fn test_render_data_during_turn() {
    let prefs = slow_prefs();
    let mut engine = CubeEngine::new();
    let at_rest = engine.render_data().to_vec();
    assert_eq!(at_rest.len(), 26);

    engine.enqueue(["U"], EnqueueOptions::default());
    assert!(engine.step(FRAME, &prefs));
    let TurnState::Animating(active) = engine.turn_state() else {
        panic!("expected animating state");
    };
    let grip = active.grip.clone();
    for (i, (now, before)) in engine.render_data().iter().zip(&at_rest).enumerate() {
        assert_eq!(now == before, !grip.contains(&i), "cubie {i}");
    }

    run_to_idle(&mut engine, &prefs);
    let expected: Vec<_> = engine
        .cubies()
        .iter()
        .map(cubesim_view::render::cubie_transform)
        .collect();
    assert_eq!(engine.render_data(), expected.as_slice());
}

#[test]
fn test_frame_with_instant_prefs() {
    let mut engine = CubeEngine::new();
    engine.enqueue_str("R R", EnqueueOptions::default());
    assert!(engine.frame(&AnimationPreferences::INSTANT));
    assert!(engine.frame(&AnimationPreferences::INSTANT));
    assert!(!engine.is_busy());
    assert!(!engine.frame(&AnimationPreferences::INSTANT));
    assert_eq!(engine.move_log_tokens(), ["R", "R"]);
}

proptest! {
    #[test]
    fn proptest_solve_restores_solved_state(
        indices in proptest::collection::vec(0..18_usize, 1..40),
    ) {
        let moves = indices.iter().map(|&i| cubesim_core::Move::ALL[i]);
        let mut engine = CubeEngine::new();
        engine.enqueue_moves(moves, EnqueueOptions::default());
        // Solve before any turn completes so that pending history is used.
        prop_assert!(engine.solve().is_ok());
        engine.flush();
        prop_assert!(engine.cubies().is_fully_solved());
        prop_assert!(engine.move_log().is_empty());
    }

    #[test]
    fn proptest_undo_everything(indices in proptest::collection::vec(0..18_usize, 0..20)) {
        let mut engine = CubeEngine::new();
        engine.enqueue_moves(indices.iter().map(|&i| cubesim_core::Move::ALL[i]), EnqueueOptions::default());
        engine.flush();
        for _ in 0..indices.len() {
            prop_assert!(engine.undo().is_ok());
        }
        prop_assert!(engine.undo().is_err());
        engine.flush();
        prop_assert!(engine.cubies().is_fully_solved());
    }
}
