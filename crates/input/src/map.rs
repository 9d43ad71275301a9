//! Key mapping from terminal events to game inputs.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    Start,
    TogglePause,
    Quit,
}

/// Map keyboard input to game inputs. Key releases are ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputAction::Quit);
    }
    let direction = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Direction::Right,
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Direction::Down,

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Direction::Rotate,

        KeyCode::Char(' ') => Direction::Drop,

        KeyCode::Char('p' | 'P') => return Some(InputAction::TogglePause),
        KeyCode::Enter | KeyCode::Char('r' | 'R') => return Some(InputAction::Start),
        _ => return None,
    };
    Some(InputAction::Move(direction))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Terminal cell `(column, row)` of a left-button press.
pub fn left_click(mouse: MouseEvent) -> Option<(u16, u16)> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((mouse.column, mouse.row)),
        _ => None,
    }
}
