//! Screen state machine tying the menus to a game session.
//!
//! Every screen has one input handler that returns control to the caller
//! after at most one transition. Restarting a run or going back to the menu
//! replaces the session in place; nothing re-enters the main loop.

use crate::core::grid::Grid;
use crate::core::session::{GameSession, TickEvent, TickResult};
use crate::core::types::{DifficultyMode, Direction};
use crate::error::Result;
use crate::records::{self, RecordSet, RecordStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Up,
    Down,
    Left,
    Right,
    Select, // Enter / Space
    Back,   // Esc: pause, resume, leave a submenu
    Quit,
    Other,
}

pub const MAIN_MENU: [&str; 4] = ["Play", "High Scores", "Difficulty", "Quit"];
pub const DIFFICULTY_MENU: [&str; 4] = ["Relaxed", "Balanced", "Extreme", "Back"];
pub const PAUSE_MENU: [&str; 3] = ["Resume", "Restart", "Main Menu"];
pub const GAME_OVER_MENU: [&str; 2] = ["Play Again", "Main Menu"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu { selected: usize },
    Difficulty { selected: usize },
    HighScores,
    Playing,
    Paused { selected: usize },
    GameOver { selected: usize },
    Exit,
}

/// Process-wide game context: the active difficulty, the record set, the
/// store behind it and the current run.
pub struct App {
    pub screen: Screen,
    difficulty: DifficultyMode,
    records: RecordSet,
    store: Box<dyn RecordStore>,
    grid: Grid,
    session: Option<GameSession>,
    rng: StdRng,
    /// Message from the most recent failed record write, if any.
    pub save_error: Option<String>,
}

impl App {
    pub fn new(grid: Grid, difficulty: DifficultyMode, store: Box<dyn RecordStore>) -> Self {
        Self::with_rng(grid, difficulty, store, StdRng::from_entropy())
    }

    pub fn with_rng(
        grid: Grid,
        difficulty: DifficultyMode,
        store: Box<dyn RecordStore>,
        rng: StdRng,
    ) -> Self {
        let records = records::load_or_default(store.as_ref());
        Self {
            screen: Screen::MainMenu { selected: 0 },
            difficulty,
            records,
            store,
            grid,
            session: None,
            rng,
            save_error: None,
        }
    }

    pub fn difficulty(&self) -> DifficultyMode {
        self.difficulty
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn should_exit(&self) -> bool {
        self.screen == Screen::Exit
    }

    /// Time between ticks while a run is being played.
    pub fn tick_interval(&self) -> Option<Duration> {
        match (self.screen, &self.session) {
            (Screen::Playing, Some(session)) => Some(session.tick_interval()),
            _ => None,
        }
    }

    /// Apply one input to the current screen.
    pub fn handle(&mut self, input: AppInput) -> Result<()> {
        if input == AppInput::Quit {
            tracing::info!("quit requested");
            self.screen = Screen::Exit;
            return Ok(());
        }

        match self.screen {
            Screen::MainMenu { selected } => self.handle_main_menu(selected, input)?,
            Screen::Difficulty { selected } => self.handle_difficulty(selected, input),
            Screen::HighScores => self.handle_high_scores(input),
            Screen::Playing => self.handle_playing(input),
            Screen::Paused { selected } => self.handle_paused(selected, input)?,
            Screen::GameOver { selected } => self.handle_game_over(selected, input)?,
            Screen::Exit => {}
        }
        Ok(())
    }

    /// Run one game tick if a run is being played.
    ///
    /// Record changes are written through to the store right away. A failed
    /// write is logged and kept in `save_error`; play continues.
    pub fn tick(&mut self) -> Result<Option<TickResult>> {
        if self.screen != Screen::Playing {
            return Ok(None);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };

        let result = session.tick(&mut self.records, &mut self.rng)?;

        if result.records_changed {
            self.persist_records();
        }
        if result
            .events
            .iter()
            .any(|event| matches!(event, TickEvent::GameOver { .. }))
        {
            self.screen = Screen::GameOver { selected: 0 };
        }

        Ok(Some(result))
    }

    fn persist_records(&mut self) {
        match self.store.save(&self.records) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::warn!(error = %e, "could not save records");
                self.save_error = Some(e.to_string());
            }
        }
    }

    /// Merge in scores another process may have written since startup.
    ///
    /// The in-memory set stays authoritative: nothing is merged while a save
    /// is failing or the store cannot be read.
    fn refresh_records(&mut self) {
        if self.save_error.is_some() {
            return;
        }
        match self.store.load() {
            Ok(stored) => self.records.merge(&stored),
            Err(e) => tracing::warn!(error = %e, "could not reload records"),
        }
    }

    fn start_run(&mut self) -> Result<()> {
        self.session = Some(GameSession::new(self.grid, self.difficulty, &mut self.rng)?);
        self.screen = Screen::Playing;
        Ok(())
    }

    fn leave_to_menu(&mut self) {
        self.session = None;
        self.screen = Screen::MainMenu { selected: 0 };
    }

    fn handle_main_menu(&mut self, selected: usize, input: AppInput) -> Result<()> {
        match input {
            AppInput::Up => {
                self.screen = Screen::MainMenu {
                    selected: wrap_up(selected, MAIN_MENU.len()),
                }
            }
            AppInput::Down => {
                self.screen = Screen::MainMenu {
                    selected: wrap_down(selected, MAIN_MENU.len()),
                }
            }
            AppInput::Select => match selected {
                0 => self.start_run()?,
                1 => {
                    self.refresh_records();
                    self.screen = Screen::HighScores;
                }
                2 => {
                    self.screen = Screen::Difficulty {
                        selected: self.difficulty.index(),
                    }
                }
                _ => self.screen = Screen::Exit,
            },
            _ => {}
        }
        Ok(())
    }

    fn handle_difficulty(&mut self, selected: usize, input: AppInput) {
        match input {
            AppInput::Up => {
                self.screen = Screen::Difficulty {
                    selected: wrap_up(selected, DIFFICULTY_MENU.len()),
                }
            }
            AppInput::Down => {
                self.screen = Screen::Difficulty {
                    selected: wrap_down(selected, DIFFICULTY_MENU.len()),
                }
            }
            AppInput::Select => {
                if selected < DifficultyMode::ALL.len() {
                    self.difficulty = DifficultyMode::from_index(selected);
                    tracing::info!(difficulty = self.difficulty.name(), "difficulty changed");
                }
                self.screen = Screen::MainMenu { selected: 0 };
            }
            AppInput::Back => self.screen = Screen::MainMenu { selected: 0 },
            _ => {}
        }
    }

    fn handle_high_scores(&mut self, input: AppInput) {
        if matches!(input, AppInput::Select | AppInput::Back) {
            self.screen = Screen::MainMenu { selected: 0 };
        }
    }

    fn handle_playing(&mut self, input: AppInput) {
        let direction = match input {
            AppInput::Up => Direction::Up,
            AppInput::Down => Direction::Down,
            AppInput::Left => Direction::Left,
            AppInput::Right => Direction::Right,
            AppInput::Back => {
                self.screen = Screen::Paused { selected: 0 };
                return;
            }
            _ => return,
        };
        if let Some(session) = self.session.as_mut() {
            session.queue_direction(direction);
        }
    }

    fn handle_paused(&mut self, selected: usize, input: AppInput) -> Result<()> {
        match input {
            AppInput::Up => {
                self.screen = Screen::Paused {
                    selected: wrap_up(selected, PAUSE_MENU.len()),
                }
            }
            AppInput::Down => {
                self.screen = Screen::Paused {
                    selected: wrap_down(selected, PAUSE_MENU.len()),
                }
            }
            AppInput::Back => self.screen = Screen::Playing,
            AppInput::Select => match selected {
                0 => self.screen = Screen::Playing,
                1 => self.start_run()?,
                _ => self.leave_to_menu(),
            },
            _ => {}
        }
        Ok(())
    }

    fn handle_game_over(&mut self, selected: usize, input: AppInput) -> Result<()> {
        match input {
            AppInput::Up => {
                self.screen = Screen::GameOver {
                    selected: wrap_up(selected, GAME_OVER_MENU.len()),
                }
            }
            AppInput::Down => {
                self.screen = Screen::GameOver {
                    selected: wrap_down(selected, GAME_OVER_MENU.len()),
                }
            }
            AppInput::Select => match selected {
                0 => self.start_run()?,
                _ => self.leave_to_menu(),
            },
            AppInput::Back => self.leave_to_menu(),
            _ => {}
        }
        Ok(())
    }
}

fn wrap_up(selected: usize, len: usize) -> usize {
    (selected + len - 1) % len
}

fn wrap_down(selected: usize, len: usize) -> usize {
    (selected + 1) % len
}
