//! Run-level behavior through the public session API.
//!
//! Covers:
//! - Resting snake before the first direction key
//! - Wraparound across every edge of the playable area
//! - Determinism for a fixed seed
//! - Reversal rejection against the last applied direction
//! - Speed bases per difficulty
//! - Eating food: score, growth, fresh food placement and write-through records

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake::core::grid::Grid;
use snake::core::{Cell, DifficultyMode, Direction, GameSession, TickEvent};
use snake::records::RecordSet;
use std::time::Duration;

fn grid() -> Grid {
    Grid::new(800, 600, 20, 50).unwrap()
}

fn new_session(difficulty: DifficultyMode, seed: u64) -> (GameSession, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let session = GameSession::new(grid(), difficulty, &mut rng).unwrap();
    (session, rng)
}

/// Greedy step toward the food that never asks for a reversal.
fn steer_toward_food(session: &mut GameSession) {
    let head = session.snake().head();
    let food = session.food();
    let current = session.snake().direction();

    let horizontal = match food.x.cmp(&head.x) {
        std::cmp::Ordering::Greater => Some(Direction::Right),
        std::cmp::Ordering::Less => Some(Direction::Left),
        std::cmp::Ordering::Equal => None,
    };
    let vertical = match food.y.cmp(&head.y) {
        std::cmp::Ordering::Greater => Some(Direction::Down),
        std::cmp::Ordering::Less => Some(Direction::Up),
        std::cmp::Ordering::Equal => None,
    };

    let candidates = [
        horizontal,
        vertical,
        Some(Direction::Up),
        Some(Direction::Left),
    ];
    for direction in candidates.into_iter().flatten() {
        if direction != current.opposite() {
            session.queue_direction(direction);
            return;
        }
    }
}

#[test]
fn test_resting_snake_holds_position() {
    let (mut session, mut rng) = new_session(DifficultyMode::Balanced, 1);
    let mut records = RecordSet::default();
    let start = session.snake().head();

    for _ in 0..20 {
        let result = session.tick(&mut records, &mut rng).unwrap();
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::GameOver { .. })));
    }

    assert_eq!(session.snake().head(), start);
    assert_eq!(session.score(), 0);
    assert_eq!(session.tick_count(), 20);
}

#[test]
fn test_wraparound_all_edges() {
    let grid = grid();
    let (mut session, mut rng) = new_session(DifficultyMode::Relaxed, 2);
    let mut records = RecordSet::default();

    // A full lap in each axis lands back on the start cell
    for (direction, lap) in [
        (Direction::Right, grid.columns()),
        (Direction::Down, grid.playable_rows()),
        (Direction::Left, grid.columns()),
        (Direction::Up, grid.playable_rows()),
    ] {
        session.queue_direction(direction);
        let start = session.snake().head();
        for _ in 0..lap {
            session.tick(&mut records, &mut rng).unwrap();
            let head = session.snake().head();
            assert!(grid.contains(head), "{head:?} left the field");
            assert!(head.y >= grid.band_rows(), "{head:?} entered the scoreboard");
            if session.score() > 0 {
                return;
            }
        }
        assert_eq!(session.snake().head(), start);
    }
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let (mut session, mut rng) = new_session(DifficultyMode::Extreme, seed);
        let mut records = RecordSet::default();
        let mut snapshots = Vec::new();
        for _ in 0..300 {
            steer_toward_food(&mut session);
            session.tick(&mut records, &mut rng).unwrap();
            snapshots.push(session.snapshot());
            if session.is_over() {
                break;
            }
        }
        snapshots
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn test_reversal_rejected_after_move() {
    let (mut session, mut rng) = new_session(DifficultyMode::Balanced, 3);
    let mut records = RecordSet::default();

    assert!(session.queue_direction(Direction::Left));
    session.tick(&mut records, &mut rng).unwrap();
    assert_eq!(session.snake().direction(), Direction::Left);

    assert!(!session.queue_direction(Direction::Right));
    // Up then Down within one tick: Down is checked against Left, not Up
    assert!(session.queue_direction(Direction::Up));
    assert!(session.queue_direction(Direction::Down));
    session.tick(&mut records, &mut rng).unwrap();
    assert_eq!(session.snake().direction(), Direction::Down);
}

#[test]
fn test_speed_bases() {
    let expectations = [
        (DifficultyMode::Relaxed, 8.0, Duration::from_millis(125)),
        (DifficultyMode::Balanced, 13.0, Duration::from_secs_f64(1.0 / 13.0)),
        (DifficultyMode::Extreme, 20.0, Duration::from_millis(50)),
    ];
    for (mode, speed, interval) in expectations {
        let (session, _) = new_session(mode, 4);
        assert_eq!(session.speed(), speed);
        assert_eq!(session.tick_interval(), interval);
    }
}

#[test]
fn test_chasing_food_scores_and_records() {
    let (mut session, mut rng) = new_session(DifficultyMode::Balanced, 5);
    let mut records = RecordSet::default();

    let mut ate = false;
    for _ in 0..200 {
        steer_toward_food(&mut session);
        let food_before = session.food();
        let result = session.tick(&mut records, &mut rng).unwrap();

        if let Some(TickEvent::AteFood { score }) = result
            .events
            .iter()
            .find(|e| matches!(e, TickEvent::AteFood { .. }))
        {
            assert_eq!(session.snake().head(), food_before);
            assert_ne!(session.food(), food_before);
            assert!(!session.snake().occupies(session.food()));
            assert_eq!(session.score(), *score);
            assert!(result.records_changed);
            assert_eq!(records.best(DifficultyMode::Balanced), *score);
            ate = true;
            break;
        }
    }

    assert!(ate, "snake never reached the food");
    assert_eq!(records.scores(DifficultyMode::Balanced).len(), 1);
    assert!(records.scores(DifficultyMode::Relaxed).is_empty());
}

#[test]
fn test_existing_best_blocks_record_until_beaten() {
    let (mut session, mut rng) = new_session(DifficultyMode::Balanced, 6);
    let mut records = RecordSet::default();
    records.insert(DifficultyMode::Balanced, 1_000);

    for _ in 0..200 {
        steer_toward_food(&mut session);
        let result = session.tick(&mut records, &mut rng).unwrap();
        assert!(!result.records_changed);
        if session.score() > 0 || session.is_over() {
            break;
        }
    }

    assert_eq!(records.scores(DifficultyMode::Balanced), &[1_000]);
}

#[test]
fn test_snapshot_matches_accessors() {
    let (session, _) = new_session(DifficultyMode::Relaxed, 8);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.snake, vec![Cell::new(20, 15)]);
    assert_eq!(snapshot.food, session.food());
    assert_eq!(snapshot.special_food, None);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.speed, 8.0);
    assert_eq!(snapshot.difficulty, DifficultyMode::Relaxed);
    assert!(!snapshot.game_over);
    assert_eq!(snapshot.tick, 0);
}
