//! Input handling - convert key events to preview actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the preview can do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Generate again with the next seed
    Regenerate,
    /// Generate again with the same seed
    Reroll,
    /// Switch between directional and ring walls
    ToggleWalls,
    /// Switch between ASCII and Unicode glyphs
    ToggleGraphics,
    /// Move the viewport by (dx, dy) cells
    Scroll(i32, i32),
    Quit,
}

/// Convert a key event to a preview action.
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('r') => Some(Action::Regenerate),
        KeyCode::Char('R') => Some(Action::Reroll),
        KeyCode::Char('w') => Some(Action::ToggleWalls),
        KeyCode::Char('g') => Some(Action::ToggleGraphics),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::Scroll(0, 1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Scroll(0, -1)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Scroll(-1, 0)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Scroll(1, 0)),

        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
