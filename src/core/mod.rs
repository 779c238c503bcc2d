//! Game core: grid geometry, snake movement, food, speed curve and the
//! per-tick session state machine. Nothing in here touches the terminal.

pub mod constants;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;
pub mod speed;
pub mod types;

pub use session::{GameSession, RunState, Snapshot, TickEvent, TickResult};
pub use types::{Cell, DifficultyMode, Direction, SpeedProfile};
