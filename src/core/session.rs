//! One run of the game: the per-tick state machine.
//!
//! A [`GameSession`] owns the snake, both foods, the speed curve and the score
//! for a single run. [`GameSession::tick`] advances it by one discrete step and
//! reports what happened as [`TickEvent`]s. The caller decides what to draw and
//! whether to persist records; the session never touches the terminal or disk.

use super::constants::{
    INITIAL_SNAKE_LENGTH, REGULAR_FOOD_GROWTH, REGULAR_FOOD_SCORE, SPECIAL_FOOD_GROWTH,
    SPECIAL_FOOD_SCORE,
};
use super::food::{spawn_regular, SpecialFood, SpecialFoodEvent};
use super::grid::Grid;
use super::snake::Snake;
use super::speed::SpeedController;
use super::types::{Cell, DifficultyMode, Direction};
use crate::error::Result;
use crate::records::RecordSet;
use rand::Rng;
use std::time::Duration;

/// Whether the run is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    GameOver,
}

/// Events emitted by a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Regular food eaten; `score` is the new total.
    AteFood { score: u32 },
    /// Special food eaten; `score` is the new total.
    AteSpecialFood { score: u32 },
    SpecialFoodSpawned { cell: Cell },
    SpecialFoodExpired { cell: Cell },
    SpeedChanged { speed: f64 },
    /// The run beat the stored best for its difficulty.
    NewRecord { score: u32 },
    /// The head ran into the body.
    GameOver { score: u32 },
}

/// Everything a tick produced.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
    /// The record set was modified and should be written through.
    pub records_changed: bool,
}

/// Read-only view of a session for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Segments from tail to head.
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub special_food: Option<Cell>,
    pub special_ticks_left: u32,
    pub score: u32,
    pub speed: f64,
    pub difficulty: DifficultyMode,
    pub game_over: bool,
    pub tick: u64,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    difficulty: DifficultyMode,
    snake: Snake,
    food: Cell,
    special: SpecialFood,
    speed: SpeedController,
    score: u32,
    state: RunState,
    /// Latest accepted direction intent, applied at the next tick.
    pending_direction: Option<Direction>,
    tick_count: u64,
    /// Score this run last wrote into the record set.
    run_record: Option<u32>,
}

impl GameSession {
    /// Start a run: a resting one-segment snake at the field center, food
    /// placed off the snake, speed reset to the difficulty's base.
    pub fn new<R: Rng>(grid: Grid, difficulty: DifficultyMode, rng: &mut R) -> Result<Self> {
        let snake = Snake::new(grid.center(), INITIAL_SNAKE_LENGTH);
        let food = spawn_regular(&grid, &snake.cells(), rng)?;

        tracing::info!(difficulty = difficulty.name(), "starting run");

        Ok(Self {
            grid,
            difficulty,
            snake,
            food,
            special: SpecialFood::default(),
            speed: SpeedController::new(difficulty.profile()),
            score: 0,
            state: RunState::Running,
            pending_direction: None,
            tick_count: 0,
            run_record: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn difficulty(&self) -> DifficultyMode {
        self.difficulty
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn special_food(&self) -> &SpecialFood {
        &self.special
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f64 {
        self.speed.speed()
    }

    /// Wall-clock time until the next tick should run.
    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == RunState::GameOver
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Buffer a direction for the next tick.
    ///
    /// The request is checked against the last direction the snake actually
    /// moved in, not the last key pressed, so two quick presses cannot fold
    /// the head back through the neck. A rejected request leaves any earlier
    /// accepted one in place. Returns whether the request was buffered.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.is_over()
            || direction == Direction::None
            || direction == self.snake.direction().opposite()
        {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance the run by one tick.
    ///
    /// `records` is the live record set for write-through updates; when the
    /// result has `records_changed` set the caller must persist it. Returns
    /// an error only when no free cell is left for new food.
    pub fn tick<R: Rng>(&mut self, records: &mut RecordSet, rng: &mut R) -> Result<TickResult> {
        let mut result = TickResult::default();
        if self.is_over() {
            return Ok(result);
        }
        self.tick_count += 1;

        // ── 1. Apply buffered direction ─────────────────────────────
        if let Some(direction) = self.pending_direction.take() {
            self.snake.steer(direction);
        }

        // ── 2. Speed from the score before this tick's food ────────
        let previous_speed = self.speed.speed();
        let speed = self.speed.update(self.score);
        if speed != previous_speed {
            tracing::debug!(speed, score = self.score, "speed changed");
            result.events.push(TickEvent::SpeedChanged { speed });
        }

        // ── 3. Move (wraparound happens inside the grid step) ──────
        let step = self.snake.step_head(&self.grid);

        // ── 4. Self collision ends the run, no food this tick ──────
        if step.self_collision {
            // Leave the head drawn in the collision cell
            self.snake.trim();
            self.state = RunState::GameOver;
            tracing::info!(
                score = self.score,
                difficulty = self.difficulty.name(),
                ticks = self.tick_count,
                "run ended"
            );
            result.events.push(TickEvent::GameOver { score: self.score });
            return Ok(result);
        }

        // ── 5. Regular food ─────────────────────────────────────────
        if step.head == self.food {
            self.snake.grow(REGULAR_FOOD_GROWTH);
            self.score += REGULAR_FOOD_SCORE;
            self.food = spawn_regular(&self.grid, &self.snake.cells(), rng)?;
            result.events.push(TickEvent::AteFood { score: self.score });
        }

        // ── 6. Special food ─────────────────────────────────────────
        if self.special.take_if_at(step.head) {
            self.snake.grow(SPECIAL_FOOD_GROWTH);
            self.score += SPECIAL_FOOD_SCORE;
            tracing::debug!(score = self.score, "special food eaten");
            result
                .events
                .push(TickEvent::AteSpecialFood { score: self.score });
        }

        self.snake.trim();

        // ── 7. Special food spawn / expiry ──────────────────────────
        match self.special.tick(&self.grid, rng) {
            Some(SpecialFoodEvent::Spawned(cell)) => {
                tracing::debug!(x = cell.x, y = cell.y, "special food spawned");
                result.events.push(TickEvent::SpecialFoodSpawned { cell });
            }
            Some(SpecialFoodEvent::Expired(cell)) => {
                tracing::debug!(x = cell.x, y = cell.y, "special food expired");
                result.events.push(TickEvent::SpecialFoodExpired { cell });
            }
            None => {}
        }

        // ── 8. Write-through record update ──────────────────────────
        if records.beats_best(self.difficulty, self.score) {
            records.raise(self.difficulty, self.run_record, self.score);
            self.run_record = Some(self.score);
            result.records_changed = true;
            result.events.push(TickEvent::NewRecord { score: self.score });
        }

        Ok(result)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells(),
            food: self.food,
            special_food: self.special.cell(),
            special_ticks_left: self.special.ticks_left(),
            score: self.score,
            speed: self.speed.speed(),
            difficulty: self.difficulty,
            game_over: self.is_over(),
            tick: self.tick_count,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    #[cfg(test)]
    pub(crate) fn set_special_food(&mut self, special: SpecialFood) {
        self.special = special;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> Grid {
        Grid::new(800, 600, 20, 50).unwrap()
    }

    fn session(difficulty: DifficultyMode) -> (GameSession, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let session = GameSession::new(grid(), difficulty, &mut rng).unwrap();
        (session, rng)
    }

    /// Food placed far from where the tests steer the snake.
    fn park_food(session: &mut GameSession) {
        session.set_food(Cell::new(0, 29));
    }

    #[test]
    fn test_new_session_defaults() {
        let (session, _) = session(DifficultyMode::Balanced);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), 13.0);
        assert_eq!(session.state(), RunState::Running);
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.snake().head(), Cell::new(20, 15));
        assert!(!session.snake().occupies(session.food()));
        assert!(!session.special_food().is_active());
    }

    #[test]
    fn test_resting_snake_waits_for_input() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        park_food(&mut session);
        let mut records = RecordSet::default();
        session.tick(&mut records, &mut rng).unwrap();
        assert_eq!(session.snake().head(), Cell::new(20, 15));
        assert!(!session.is_over());
    }

    #[test]
    fn test_queued_direction_applies_next_tick() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        park_food(&mut session);
        let mut records = RecordSet::default();
        assert!(session.queue_direction(Direction::Up));
        session.tick(&mut records, &mut rng).unwrap();
        assert_eq!(session.snake().head(), Cell::new(20, 14));
        assert_eq!(session.snake().direction(), Direction::Up);
    }

    #[test]
    fn test_reverse_rejected_against_applied_direction() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        park_food(&mut session);
        let mut records = RecordSet::default();
        session.queue_direction(Direction::Right);
        session.tick(&mut records, &mut rng).unwrap();

        // Up is fine, then Left is the opposite of the applied Right
        assert!(session.queue_direction(Direction::Up));
        assert!(!session.queue_direction(Direction::Left));
        session.tick(&mut records, &mut rng).unwrap();
        assert_eq!(session.snake().direction(), Direction::Up);
    }

    #[test]
    fn test_eating_regular_food() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        let mut records = RecordSet::default();
        session.set_food(Cell::new(21, 15));
        session.queue_direction(Direction::Right);

        let result = session.tick(&mut records, &mut rng).unwrap();

        assert_eq!(session.score(), 1);
        assert_eq!(session.snake().len(), 2);
        assert_eq!(session.snake().target_len(), 2);
        assert!(!session.snake().occupies(session.food()));
        assert!(result.events.contains(&TickEvent::AteFood { score: 1 }));
    }

    #[test]
    fn test_eating_special_food() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        park_food(&mut session);
        let mut records = RecordSet::default();
        session.set_special_food(SpecialFood::place(Cell::new(21, 15), 50));
        session.queue_direction(Direction::Right);

        let result = session.tick(&mut records, &mut rng).unwrap();

        assert_eq!(session.score(), 5);
        assert_eq!(session.snake().target_len(), 6);
        assert!(result.events.contains(&TickEvent::AteSpecialFood { score: 5 }));
        // Gone at once, a fresh one could only have spawned elsewhere
        assert_ne!(session.special_food().cell(), Some(Cell::new(21, 15)));
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::SpecialFoodExpired { .. })));

        for _ in 0..4 {
            session.tick(&mut records, &mut rng).unwrap();
        }
        assert_eq!(session.snake().len(), 6);
    }

    #[test]
    fn test_special_food_expires_without_reward() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        park_food(&mut session);
        let mut records = RecordSet::default();
        session.set_special_food(SpecialFood::place(Cell::new(5, 5), 1));

        let result = session.tick(&mut records, &mut rng).unwrap();

        assert!(result.events.contains(&TickEvent::SpecialFoodExpired {
            cell: Cell::new(5, 5)
        }));
        assert_eq!(session.score(), 0);
        assert!(!session.special_food().is_active());
    }

    #[test]
    fn test_self_collision_ends_run_without_scoring() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        let mut records = RecordSet::default();
        session.set_snake(Snake::from_cells(
            &[
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(5, 5),
            ],
            Direction::Right,
        ));
        // Food sits in the collision cell; it must not be eaten
        session.set_food(Cell::new(6, 5));

        let result = session.tick(&mut records, &mut rng).unwrap();

        assert!(session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(result.events, vec![TickEvent::GameOver { score: 0 }]);
        assert_eq!(session.snake().head(), Cell::new(6, 5));
        assert!(!result.records_changed);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        let mut records = RecordSet::default();
        session.set_snake(Snake::from_cells(
            &[
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(5, 5),
            ],
            Direction::Right,
        ));
        session.tick(&mut records, &mut rng).unwrap();
        let ticks = session.tick_count();

        let result = session.tick(&mut records, &mut rng).unwrap();
        assert!(result.events.is_empty());
        assert_eq!(session.tick_count(), ticks);
        assert!(!session.queue_direction(Direction::Up));
    }

    #[test]
    fn test_speed_uses_score_before_food() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        let mut records = RecordSet::default();
        session.set_score(4);
        session.set_food(Cell::new(21, 15));
        session.queue_direction(Direction::Right);

        session.tick(&mut records, &mut rng).unwrap();
        assert_eq!(session.score(), 5);
        assert_eq!(session.speed(), 13.0);

        park_food(&mut session);
        let result = session.tick(&mut records, &mut rng).unwrap();
        assert_eq!(session.speed(), 13.5);
        assert!(result
            .events
            .contains(&TickEvent::SpeedChanged { speed: 13.5 }));
    }

    #[test]
    fn test_record_written_through_once_per_run() {
        let (mut session, mut rng) = session(DifficultyMode::Balanced);
        let mut records = RecordSet::default();
        for score in [10, 8, 3] {
            records.insert(DifficultyMode::Balanced, score);
        }
        session.set_score(10);
        session.queue_direction(Direction::Right);

        for expected in [11, 12] {
            let head = session.snake().head();
            session.set_food(Cell::new(head.x + 1, head.y));
            let result = session.tick(&mut records, &mut rng).unwrap();
            assert!(result.records_changed);
            assert!(result
                .events
                .contains(&TickEvent::NewRecord { score: expected }));
        }

        assert_eq!(records.scores(DifficultyMode::Balanced), &[12, 10, 8]);

        park_food(&mut session);
        let result = session.tick(&mut records, &mut rng).unwrap();
        assert!(!result.records_changed);
    }

    #[test]
    fn test_length_never_exceeds_target() {
        let (mut session, mut rng) = session(DifficultyMode::Extreme);
        let mut records = RecordSet::default();
        session.queue_direction(Direction::Right);
        let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Right];
        for tick in 0..400 {
            if tick % 9 == 0 {
                session.queue_direction(turns[(tick / 9) % turns.len()]);
            }
            session.tick(&mut records, &mut rng).unwrap();
            if session.is_over() {
                break;
            }
            let snake = session.snake();
            assert!(snake.len() <= snake.target_len());
            // Only a special food leaves growth pending past the eating tick
            assert!(snake.target_len() - snake.len() <= SPECIAL_FOOD_GROWTH);
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut session, mut rng) = session(DifficultyMode::Relaxed);
        let mut records = RecordSet::default();
        session.set_special_food(SpecialFood::place(Cell::new(3, 3), 10));
        session.tick(&mut records, &mut rng).unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.snake, session.snake().cells());
        assert_eq!(snap.food, session.food());
        assert_eq!(snap.special_food, Some(Cell::new(3, 3)));
        assert_eq!(snap.special_ticks_left, 9);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.speed, 8.0);
        assert_eq!(snap.difficulty, DifficultyMode::Relaxed);
        assert!(!snap.game_over);
        assert_eq!(snap.tick, 1);
    }
}
