//! Snake play field rendering.
//!
//! Uses half-block pixel rendering. Each game cell maps to a colored pixel;
//! pairs of vertical pixels are packed into one terminal row using the `▀`
//! (upper half block) character with fg=top, bg=bottom colors. The reserved
//! scoreboard rows at the top of the grid are drawn as a text band instead.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_status_bar, GameLayout,
};
use crate::core::session::GameSession;
use crate::core::types::{Cell, DifficultyMode, Direction};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

// ── Colors ───────────────────────────────────────────────────────────
const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const FOOD_RGB: (u8, u8, u8) = (255, 80, 40);
const FOOD_COLOR: Color = Color::Rgb(FOOD_RGB.0, FOOD_RGB.1, FOOD_RGB.2);
const SPECIAL_COLOR: Color = Color::Rgb(255, 215, 0);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

/// Special food starts blinking when this few ticks remain.
const SPECIAL_BLINK_TICKS: u32 = 20;

/// Food pulses around [`FOOD_COLOR`] over a 20-tick cycle.
fn food_color(tick: u64) -> Color {
    let pulse = ((tick % 20) as f64 / 20.0 * std::f64::consts::PI * 2.0).sin();
    Color::Rgb(
        FOOD_RGB.0,
        (FOOD_RGB.1 as f64 + pulse * 30.0) as u8,
        (FOOD_RGB.2 as f64 + pulse * 20.0) as u8,
    )
}

/// Scoreboard color for a difficulty.
pub fn mode_color(mode: DifficultyMode) -> Color {
    match mode {
        DifficultyMode::Relaxed => Color::Green,
        DifficultyMode::Balanced => Color::Yellow,
        DifficultyMode::Extreme => Color::Red,
    }
}

/// Render the play field, scoreboard, status bar and info panel.
///
/// Returns the layout so overlays (pause, game over) can be drawn over the
/// play field.
pub fn render_snake_scene(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    best: u32,
    paused: bool,
) -> GameLayout {
    let layout = create_game_layout(frame, area, " Snake ", Color::LightGreen, 16, 22);

    render_scoreboard(frame, layout.scoreboard, session, best);
    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session, paused);
    render_info_panel(frame, layout.info_panel, session);

    layout
}

/// Interpolated RGB color for a body segment. Index 0 is the segment next to
/// the head.
fn body_color(index: usize, body_len: usize) -> Color {
    let t = index as f64 / (body_len.saturating_sub(1)).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

fn render_scoreboard(frame: &mut Frame, area: Rect, session: &GameSession, best: u32) {
    let mode = session.difficulty();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(" Score: ", label),
        Span::styled(session.score().to_string(), value),
        Span::styled("   Record: ", label),
        Span::styled(best.max(session.score()).to_string(), value),
        Span::styled("   Mode: ", label),
        Span::styled(
            mode.name(),
            Style::default()
                .fg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Speed: ", label),
        Span::styled(format!("{:.2}", session.speed()), value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Build the color grid for the playable rows, indexed `[row][column]` with
/// row 0 being the first row below the scoreboard band.
fn pixel_grid(session: &GameSession) -> Vec<Vec<Option<Color>>> {
    let grid = session.grid();
    let width = grid.columns() as usize;
    let height = grid.playable_rows() as usize;
    let band = grid.band_rows();
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; width]; height];

    let mut paint = |cell: Cell, color: Color| {
        let row = cell.y - band;
        if cell.x >= 0 && row >= 0 && (cell.x as usize) < width && (row as usize) < height {
            pixels[row as usize][cell.x as usize] = Some(color);
        }
    };

    paint(session.food(), food_color(session.tick_count()));

    let special = session.special_food();
    if let Some(cell) = special.cell() {
        let blinking = special.ticks_left() <= SPECIAL_BLINK_TICKS;
        if !blinking || session.tick_count() % 4 < 2 {
            paint(cell, SPECIAL_COLOR);
        }
    }

    // Head last so it stays visible when it overlaps the body
    let body = session.snake().body();
    let body_len = body.len().saturating_sub(1);
    for (i, &segment) in body.iter().rev().skip(1).enumerate() {
        paint(segment, body_color(i, body_len));
    }
    paint(session.snake().head(), HEAD_COLOR);

    pixels
}

fn border_row(left: char, right: char, inner_w: usize) -> Line<'static> {
    let mut s = String::with_capacity(inner_w + 2);
    s.push(left);
    s.extend(std::iter::repeat(BORDER_H).take(inner_w));
    s.push(right);
    Line::from(Span::styled(s, Style::default().fg(BORDER_COLOR)))
}

/// Render the play field using half-block pixel rendering.
fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = pixel_grid(session);
    let grid_h = pixels.len();
    let grid_w = pixels.first().map_or(0, Vec::len);

    // ── Layout dimensions ───────────────────────────────────────
    let content_rows = grid_h.div_ceil(2);
    let render_w = ((grid_w + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    frame.render_widget(
        Paragraph::new(border_row(BORDER_TL, BORDER_TR, inner_w)),
        Rect::new(x_off, y_off, render_w, 1),
    );

    // ── Game content rows ───────────────────────────────────────
    let empty_row: Vec<Option<Color>> = vec![None; grid_w];
    for term_row in 0..content_rows {
        let row_y = y_off + 1 + term_row as u16;
        if row_y >= area.y + area.height {
            break;
        }

        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans: Vec<Span> = vec![Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(BORDER_COLOR),
        )];

        // Batch consecutive cells with the same style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()).take(inner_w) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(BORDER_COLOR),
        ));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, row_y, render_w, 1),
        );
    }

    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        frame.render_widget(
            Paragraph::new(border_row(BORDER_BL, BORDER_BR, inner_w)),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &GameSession, paused: bool) {
    if session.is_over() {
        render_status_bar(frame, area, "Game over", Color::Red, &[("[Enter]", "Select")]);
    } else if paused {
        render_status_bar(frame, area, "Paused", Color::Yellow, &[("[Esc]", "Resume")]);
    } else if session.snake().direction() == Direction::None {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::LightGreen,
            &[("[Arrows]", "Start"), ("[Esc]", "Pause")],
        );
    } else {
        render_status_bar(
            frame,
            area,
            "Slither!",
            Color::Green,
            &[("[Arrows/WASD]", "Move"), ("[Esc]", "Pause"), ("[Q]", "Quit")],
        );
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession) {
    let inner = render_info_panel_frame(frame, area);
    let grid = session.grid();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(session.snake().len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(
                format!("{}x{}", grid.columns(), grid.playable_rows()),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Tick: ", label),
            Span::styled(format!("{}ms", session.tick_interval().as_millis()), value),
        ]),
    ];

    if session.special_food().is_active() {
        lines.push(Line::from(vec![
            Span::styled("Bonus: ", label),
            Span::styled(
                format!("{} ticks", session.special_food().ticks_left()),
                Style::default().fg(SPECIAL_COLOR),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for (color, name) in [
        (HEAD_COLOR, "Head"),
        (
            Color::Rgb(
                BODY_BRIGHT.0 as u8,
                BODY_BRIGHT.1 as u8,
                BODY_BRIGHT.2 as u8,
            ),
            "Body",
        ),
        (FOOD_COLOR, "Food +1"),
        (SPECIAL_COLOR, "Bonus +5"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
            Span::styled(name, label),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> GameSession {
        let grid = Grid::new(800, 600, 20, 50).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        GameSession::new(grid, DifficultyMode::Balanced, &mut rng).unwrap()
    }

    #[test]
    fn test_pixel_grid_excludes_band() {
        let session = session();
        let pixels = pixel_grid(&session);
        assert_eq!(pixels.len(), 27);
        assert_eq!(pixels[0].len(), 40);

        let head = session.snake().head();
        assert_eq!(pixels[(head.y - 3) as usize][head.x as usize], Some(HEAD_COLOR));
    }

    #[test]
    fn test_food_pulses_around_legend_color() {
        assert_eq!(food_color(0), FOOD_COLOR);
        assert_eq!(food_color(10), FOOD_COLOR);
        assert_ne!(food_color(5), FOOD_COLOR);

        let session = session();
        let food = session.food();
        let pixels = pixel_grid(&session);
        assert_eq!(
            pixels[(food.y - 3) as usize][food.x as usize],
            Some(food_color(session.tick_count()))
        );
    }

    #[test]
    fn test_body_gradient_fades() {
        let near = body_color(0, 10);
        let far = body_color(9, 10);
        assert_eq!(near, Color::Rgb(50, 220, 50));
        assert_eq!(far, Color::Rgb(20, 80, 20));
    }

    #[test]
    fn test_mode_colors() {
        assert_eq!(mode_color(DifficultyMode::Relaxed), Color::Green);
        assert_eq!(mode_color(DifficultyMode::Balanced), Color::Yellow);
        assert_eq!(mode_color(DifficultyMode::Extreme), Color::Red);
    }
}
