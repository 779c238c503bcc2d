//! Keyboard mapping from crossterm events to [`AppInput`].

use crate::app::AppInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a key event. Releases and repeats are ignored so a held key
/// never queues more than one direction per press.
pub fn map_key(key: KeyEvent) -> Option<AppInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => AppInput::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => AppInput::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => AppInput::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => AppInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => AppInput::Select,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => AppInput::Back,
        KeyCode::Char('q') | KeyCode::Char('Q') => AppInput::Quit,
        _ => AppInput::Other,
    };
    Some(input)
}
