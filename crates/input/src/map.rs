//! Key and mouse mapping from terminal events to input commands.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// What the player asked for, before it is resolved against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Move the power source
    MovePower(Direction),
    /// Move the selection cursor
    MoveCursor(Direction),
    /// Rotate the piece under the cursor
    RotateSelected,
    /// Rotate the piece under a terminal cell (column, row)
    Click { x: u16, y: u16 },
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        // Power source
        KeyCode::Up => Some(InputCommand::MovePower(Direction::Up)),
        KeyCode::Down => Some(InputCommand::MovePower(Direction::Down)),
        KeyCode::Left => Some(InputCommand::MovePower(Direction::Left)),
        KeyCode::Right => Some(InputCommand::MovePower(Direction::Right)),

        // Cursor
        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputCommand::MoveCursor(Direction::Up))
        }
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputCommand::MoveCursor(Direction::Down))
        }
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputCommand::MoveCursor(Direction::Left))
        }
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputCommand::MoveCursor(Direction::Right))
        }

        // Rotation
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputCommand::RotateSelected),

        _ => None,
    }
}

/// Map a mouse event to a click command (left button press only).
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<InputCommand> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputCommand::Click {
            x: mouse.column,
            y: mouse.row,
        }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys_move_power() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(InputCommand::MovePower(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(InputCommand::MovePower(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(InputCommand::MovePower(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(InputCommand::MovePower(Direction::Right))
        );
    }

    #[test]
    fn test_letter_keys_move_cursor() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('k'))),
            Some(InputCommand::MoveCursor(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('S'))),
            Some(InputCommand::MoveCursor(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some(InputCommand::MoveCursor(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('L'))),
            Some(InputCommand::MoveCursor(Direction::Right))
        );
    }

    #[test]
    fn test_rotate_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputCommand::RotateSelected)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(InputCommand::RotateSelected)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_left_click_only() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 7, 3)),
            Some(InputCommand::Click { x: 7, y: 3 })
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 7, 3)),
            None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 7, 3)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
