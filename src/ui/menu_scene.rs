//! Menu screens: main menu, difficulty picker, high scores, pause and game over.

use super::game_common::{render_menu_overlay, render_status_bar, MenuOverlay};
use super::snake_scene::mode_color;
use crate::app::{DIFFICULTY_MENU, GAME_OVER_MENU, MAIN_MENU, PAUSE_MENU};
use crate::core::constants::RECORDS_PER_DIFFICULTY;
use crate::core::types::DifficultyMode;
use crate::records::RecordSet;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE_ART: [&str; 4] = [
    "█▀▀ █▄ █ ▄▀█ █▄▀ █▀▀",
    "▀▀█ █ ▀█ █▀█ █ █ █▀▀",
    "▀▀▀ ▀  ▀ ▀ ▀ ▀ ▀ ▀▀▀",
    "",
];

fn background(frame: &mut Frame, area: Rect) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn mode_line(mode: DifficultyMode) -> Line<'static> {
    Line::from(vec![
        Span::styled("Mode: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            mode.name(),
            Style::default()
                .fg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn render_main_menu(frame: &mut Frame, area: Rect, selected: usize, mode: DifficultyMode) {
    let inner = background(frame, area);

    let mut body: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::LightGreen))))
        .collect();
    body.push(mode_line(mode));

    render_menu_overlay(
        frame,
        inner,
        &MenuOverlay {
            title: "Main Menu",
            color: Color::LightGreen,
            body,
            entries: &MAIN_MENU,
            selected,
        },
    );
}

pub fn render_difficulty_menu(
    frame: &mut Frame,
    area: Rect,
    selected: usize,
    current: DifficultyMode,
) {
    let inner = background(frame, area);

    let highlight = DifficultyMode::ALL
        .get(selected)
        .map_or(Color::White, |mode| mode_color(*mode));

    let mut body = vec![mode_line(current)];
    if let Some(mode) = DifficultyMode::ALL.get(selected) {
        let profile = mode.profile();
        body.push(Line::from(Span::styled(
            format!(
                "Starts at {:.0}/s, +{} every {} points",
                profile.initial_speed, profile.increment, profile.threshold
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    render_menu_overlay(
        frame,
        inner,
        &MenuOverlay {
            title: "Difficulty",
            color: highlight,
            body,
            entries: &DIFFICULTY_MENU,
            selected,
        },
    );
}

pub fn render_high_scores(frame: &mut Frame, area: Rect, records: &RecordSet) {
    let inner = background(frame, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(RECORDS_PER_DIFFICULTY as u16 + 2),
            Constraint::Length(2),
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "High Scores",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    for (mode, column) in DifficultyMode::ALL.iter().zip(columns.iter()) {
        let color = mode_color(*mode);
        let block = Block::default()
            .title(format!(" {} ", mode.name()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let column_inner = block.inner(*column);
        frame.render_widget(block, *column);

        let scores = records.scores(*mode);
        let lines: Vec<Line> = (0..RECORDS_PER_DIFFICULTY)
            .map(|rank| {
                let value = scores
                    .get(rank)
                    .map_or_else(|| "---".to_string(), |score| score.to_string());
                Line::from(vec![
                    Span::styled(
                        format!("{}. ", rank + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value, Style::default().fg(Color::White)),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            column_inner,
        );
    }

    render_status_bar(
        frame,
        chunks[2],
        "",
        Color::DarkGray,
        &[("[Enter]", "Back"), ("[Esc]", "Back")],
    );
}

pub fn render_pause_overlay(frame: &mut Frame, area: Rect, selected: usize) {
    render_menu_overlay(
        frame,
        area,
        &MenuOverlay {
            title: "Paused",
            color: Color::Yellow,
            body: Vec::new(),
            entries: &PAUSE_MENU,
            selected,
        },
    );
}

pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    selected: usize,
    score: u32,
    best: u32,
) {
    let body = vec![
        Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("High Score: {}", best),
            Style::default().fg(Color::Cyan),
        )),
    ];

    render_menu_overlay(
        frame,
        area,
        &MenuOverlay {
            title: "Game Over",
            color: Color::Red,
            body,
            entries: &GAME_OVER_MENU,
            selected,
        },
    );
}
