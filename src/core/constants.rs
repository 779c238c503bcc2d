// Play field geometry (pixels)
pub const FIELD_WIDTH_PX: u32 = 800;
pub const FIELD_HEIGHT_PX: u32 = 600;
pub const BLOCK_SIZE_PX: u32 = 20;
pub const SCOREBOARD_HEIGHT_PX: u32 = 50;

// Snake
pub const INITIAL_SNAKE_LENGTH: usize = 1;
pub const REGULAR_FOOD_GROWTH: usize = 1;
pub const SPECIAL_FOOD_GROWTH: usize = 5;
pub const REGULAR_FOOD_SCORE: u32 = 1;
pub const SPECIAL_FOOD_SCORE: u32 = 5;

// Special food: one roll in [1, SPECIAL_FOOD_ROLL_SIDES] per tick, spawns on 1
pub const SPECIAL_FOOD_ROLL_SIDES: u32 = 100;
pub const SPECIAL_FOOD_LIFETIME_TICKS: u32 = 100;

// Random samples before food placement falls back to a full scan
pub const MAX_FOOD_PLACEMENT_ATTEMPTS: u32 = 1_000;

// Records
pub const RECORDS_PER_DIFFICULTY: usize = 3;
pub const RECORDS_FILENAME: &str = "records.json";
pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "snake.log";

// Frontend: input poll timeout while no run is ticking
pub const INPUT_POLL_MS: u64 = 50;
