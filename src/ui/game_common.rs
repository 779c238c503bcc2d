//! Shared UI pieces: the bordered game layout, status bar, info panel frame
//! and centred menu overlays.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Scoreboard band (1 line) - top left, inside outer border
    pub scoreboard: Rect,
    /// Play field - left, below the scoreboard
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create the game layout with outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │ [scoreboard]                    │             │
/// │   [play field]                  │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(content_min_height),
            Constraint::Length(2),
        ])
        .split(h_chunks[0]);

    GameLayout {
        scoreboard: v_chunks[0],
        content: v_chunks[1],
        status_bar: v_chunks[2],
        info_panel: h_chunks[1],
    }
}

/// Render a status bar (2 lines: status message + controls).
///
/// `controls` is a slice of (key, action) pairs, e.g.
/// `[("[Enter]", "Select"), ("[Esc]", "Back")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let controls_line = Paragraph::new(controls_line(controls)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

fn controls_line<'a>(controls: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Render an info panel frame with " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A centred modal box with a title, optional body lines and a selectable
/// list of entries.
pub struct MenuOverlay<'a> {
    pub title: &'a str,
    pub color: Color,
    pub body: Vec<Line<'a>>,
    pub entries: &'a [&'a str],
    pub selected: usize,
}

/// Render a `MenuOverlay` centred in `area`. The background is cleared only
/// under the modal so the play field stays visible around it.
pub fn render_menu_overlay(frame: &mut Frame, area: Rect, menu: &MenuOverlay) {
    let mut lines = menu.body.clone();
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    for (i, entry) in menu.entries.iter().enumerate() {
        lines.push(if i == menu.selected {
            Line::from(Span::styled(
                format!("> {} <", entry),
                Style::default()
                    .fg(menu.color)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                entry.to_string(),
                Style::default().fg(Color::Gray),
            ))
        });
    }
    lines.push(Line::from(""));
    lines.push(controls_line(&[("[↑↓]", "Move"), ("[Enter]", "Select")]));

    let widest = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let modal_width = (widest + 6).max(menu.title.len() as u16 + 6).min(area.width);
    let modal_height = (lines.len() as u16 + 4).min(area.height);
    let x = area.x + (area.width.saturating_sub(modal_width)) / 2;
    let y = area.y + (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(menu.color)
                .add_modifier(Modifier::BOLD),
        )
        .title(format!(" {} ", menu.title));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let padded = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, padded);
}
