pub mod game_common;
pub mod menu_scene;
pub mod snake_scene;

use crate::app::{App, Screen};
use ratatui::Frame;

/// Draw the current screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let best = app.records().best(app.difficulty());

    match app.screen {
        Screen::MainMenu { selected } => {
            menu_scene::render_main_menu(frame, size, selected, app.difficulty())
        }
        Screen::Difficulty { selected } => {
            menu_scene::render_difficulty_menu(frame, size, selected, app.difficulty())
        }
        Screen::HighScores => menu_scene::render_high_scores(frame, size, app.records()),
        Screen::Playing | Screen::Paused { .. } | Screen::GameOver { .. } => {
            let Some(session) = app.session() else {
                return;
            };
            let paused = matches!(app.screen, Screen::Paused { .. });
            let layout = snake_scene::render_snake_scene(frame, size, session, best, paused);

            match app.screen {
                Screen::Paused { selected } => {
                    menu_scene::render_pause_overlay(frame, layout.content, selected)
                }
                Screen::GameOver { selected } => menu_scene::render_game_over_overlay(
                    frame,
                    layout.content,
                    selected,
                    session.score(),
                    best,
                ),
                _ => {}
            }
        }
        Screen::Exit => {}
    }
}
