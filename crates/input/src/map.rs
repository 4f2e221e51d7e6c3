//! Key mapping from terminal events to input events.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys that drive the soft drop.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Map keyboard input to input events.
///
/// Presses and repeats move and rotate; only the soft drop key cares about
/// releases. Restart reacts to the initial press alone.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return is_soft_drop_key(key.code).then_some(InputEvent::SoftDropOff);
    }

    if is_soft_drop_key(key.code) {
        return Some(InputEvent::SoftDropOn);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::MoveRight)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputEvent::Rotate),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') if key.kind == KeyEventKind::Press => {
            Some(InputEvent::Restart)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
