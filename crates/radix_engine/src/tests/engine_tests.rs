use super::*;
use shared::error::ErrorCode;

const TEXTBOOK: [u64; 8] = [170, 45, 75, 90, 802, 24, 2, 66];

fn drain(engine: &mut RadixEngine) -> Vec<StepResult> {
    let mut results = Vec::new();
    loop {
        let result = engine.step().expect("step");
        let done = result.is_completed();
        results.push(result);
        if done {
            return results;
        }
    }
}

#[test]
fn lsd_textbook_passes_match_expected_snapshots() {
    let mut engine = RadixEngine::new(TEXTBOOK.to_vec());
    assert_eq!(engine.digits(), 3);

    let first = engine.start(SortKind::Lsd).expect("start");
    assert_eq!(first, StepResult::Progressed(TEXTBOOK.to_vec()));

    assert_eq!(
        engine.step().expect("pass 0"),
        StepResult::Progressed(vec![170, 90, 802, 2, 24, 45, 75, 66])
    );
    assert_eq!(
        engine.step().expect("pass 1"),
        StepResult::Progressed(vec![802, 2, 24, 45, 66, 170, 75, 90])
    );
    assert_eq!(
        engine.step().expect("pass 2"),
        StepResult::Completed(vec![2, 24, 45, 66, 75, 90, 170, 802])
    );
    assert_eq!(engine.phase(), RunPhase::Completed);
    assert_eq!(engine.steps_taken(), 3);
}

#[test]
fn lsd_completes_in_digit_count_steps() {
    for (numbers, digits) in [
        (vec![3, 1, 2], 1),
        (vec![10, 9, 100, 1000, 0], 4),
        (vec![0, 0, 0], 1),
        (vec![u64::MAX, 1], 20),
    ] {
        let mut engine = RadixEngine::new(numbers);
        engine.start(SortKind::Lsd).expect("start");
        let results = drain(&mut engine);
        assert_eq!(results.len(), digits);
        assert_eq!(
            engine.cursor_position(),
            Some(CursorPosition::Lsd {
                current_exp: digits as u32
            })
        );
    }
}

#[test]
fn msd_steps_once_per_distinct_value() {
    let mut engine = RadixEngine::new(vec![31, 12, 31, 5, 12, 40, 5, 5]);
    engine.start(SortKind::Msd).expect("start");
    let results = drain(&mut engine);

    assert_eq!(results.len(), 4);
    assert_eq!(
        results.last().expect("final").sequence(),
        &[5, 5, 5, 12, 12, 31, 31, 40]
    );
    assert!(results[..3].iter().all(|r| !r.is_completed()));
}

#[test]
fn msd_snapshots_keep_unresolved_tail_grouped_by_bucket() {
    let mut engine = RadixEngine::new(vec![93, 15, 41, 12, 97, 44]);
    engine.start(SortKind::Msd).expect("start");

    // tens split gives [15,12] [41,44] [93,97]; the first bucket is split again
    // on the ones digit before its smallest leaf resolves.
    assert_eq!(
        engine.step().expect("step"),
        StepResult::Progressed(vec![12, 15, 41, 44, 93, 97])
    );
    assert_eq!(
        engine.cursor_position(),
        Some(CursorPosition::Msd {
            pending_frames: 3,
            resolved: 1
        })
    );
}

#[test]
fn msd_tail_preserves_original_order_within_bucket() {
    let mut engine = RadixEngine::new(vec![29, 21, 3, 28, 1]);
    engine.start(SortKind::Msd).expect("start");

    // tens split: [3,1] [29,21,28]; leaf 1 resolves after the ones split of
    // the first bucket, while the second bucket is untouched.
    assert_eq!(
        engine.step().expect("step"),
        StepResult::Progressed(vec![1, 3, 29, 21, 28])
    );
}

#[test]
fn empty_input_completes_on_start() {
    let mut engine = RadixEngine::new(Vec::new());
    assert_eq!(engine.digits(), 0);
    assert_eq!(
        engine.start(SortKind::Lsd).expect("start"),
        StepResult::Completed(Vec::new())
    );
    assert_eq!(engine.phase(), RunPhase::Completed);

    let err = engine.step().expect_err("no steps after completion");
    assert_eq!(err.code(), ErrorCode::InvalidState);
}

#[test]
fn empty_input_is_rejected_when_configured() {
    let mut engine = RadixEngine::with_options(
        Vec::new(),
        EngineOptions { reject_empty: true },
    );
    let err = engine.start(SortKind::Msd).expect_err("precondition");
    assert_eq!(err.code(), ErrorCode::Precondition);
    assert_eq!(engine.phase(), RunPhase::Idle);
}

#[test]
fn step_before_start_is_invalid() {
    let mut engine = RadixEngine::new(vec![1, 2]);
    let err = engine.step().expect_err("not started");
    assert_eq!(err, EngineError::invalid_state("step", RunPhase::Idle));
}

#[test]
fn step_after_completion_is_invalid() {
    let mut engine = RadixEngine::new(vec![4, 2]);
    engine.start(SortKind::Lsd).expect("start");
    drain(&mut engine);
    let err = engine.step().expect_err("completed");
    assert_eq!(err, EngineError::invalid_state("step", RunPhase::Completed));
}

#[test]
fn paused_step_returns_last_snapshot_without_advancing() {
    for kind in [SortKind::Lsd, SortKind::Msd] {
        let mut engine = RadixEngine::new(TEXTBOOK.to_vec());
        engine.start(kind).expect("start");
        let before = engine.step().expect("first step");
        let position = engine.cursor_position();

        engine.pause().expect("pause");
        engine.pause().expect("pause is idempotent");
        assert_eq!(engine.phase(), RunPhase::Paused);

        for _ in 0..3 {
            let paused = engine.step().expect("paused step");
            assert_eq!(paused.sequence(), before.sequence());
            assert!(!paused.is_completed());
        }
        assert_eq!(engine.cursor_position(), position);
        assert_eq!(engine.steps_taken(), 1);

        engine.resume().expect("resume");
        engine.resume().expect("resume is idempotent");
        assert_eq!(engine.phase(), RunPhase::Running);
        assert_eq!(engine.steps_taken(), 1);
        let results = drain(&mut engine);
        assert_eq!(
            results.last().expect("final").sequence(),
            &[2, 24, 45, 66, 75, 90, 170, 802]
        );
    }
}

#[test]
fn toggle_pause_flips_phase() {
    let mut engine = RadixEngine::new(vec![5, 3]);
    assert!(engine.toggle_pause().is_err());

    engine.start(SortKind::Lsd).expect("start");
    assert_eq!(engine.toggle_pause().expect("toggle"), RunPhase::Paused);
    assert_eq!(engine.toggle_pause().expect("toggle"), RunPhase::Running);
}

#[test]
fn pause_requires_active_run() {
    let mut engine = RadixEngine::new(vec![5, 3]);
    assert_eq!(
        engine.pause().expect_err("idle"),
        EngineError::invalid_state("pause", RunPhase::Idle)
    );
    engine.start(SortKind::Lsd).expect("start");
    drain(&mut engine);
    assert_eq!(
        engine.resume().expect_err("completed"),
        EngineError::invalid_state("resume", RunPhase::Completed)
    );
}

#[test]
fn start_while_running_is_invalid() {
    let mut engine = RadixEngine::new(vec![5, 3]);
    engine.start(SortKind::Lsd).expect("start");
    engine.pause().expect("pause");
    assert_eq!(
        engine.start(SortKind::Msd).expect_err("active"),
        EngineError::invalid_state("start", RunPhase::Paused)
    );
}

#[test]
fn cancel_then_start_replays_fresh_run() {
    for kind in [SortKind::Lsd, SortKind::Msd] {
        let mut fresh = RadixEngine::new(TEXTBOOK.to_vec());
        fresh.start(kind).expect("start");
        let expected = drain(&mut fresh);

        let mut engine = RadixEngine::new(TEXTBOOK.to_vec());
        engine.start(kind).expect("start");
        engine.step().expect("step");
        engine.cancel();
        engine.cancel();
        assert_eq!(engine.phase(), RunPhase::Idle);
        assert_eq!(engine.snapshot(), &TEXTBOOK);
        assert!(engine.step().is_err());

        let first = engine.start(kind).expect("restart");
        assert_eq!(first, StepResult::Progressed(TEXTBOOK.to_vec()));
        assert_eq!(drain(&mut engine), expected);
    }
}

#[test]
fn load_replaces_input_only_when_idle() {
    let mut engine = RadixEngine::new(vec![1]);
    engine.start(SortKind::Lsd).expect("start");
    assert!(engine.load(vec![9, 8]).is_err());

    engine.step().expect("step");
    engine.load(vec![1234, 5]).expect("load after completion");
    assert_eq!(engine.digits(), 4);
    assert_eq!(engine.phase(), RunPhase::Idle);
    assert_eq!(engine.input(), &[1234, 5]);
    assert_eq!(engine.kind(), None);
}
