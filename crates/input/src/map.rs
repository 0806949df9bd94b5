//! Key and mouse mapping from terminal events to driver commands.

use crate::engine::Command;
use crate::types::{Coordinate, Direction, GameStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to a driver command.
///
/// `status` decides what the primary key (Space/Enter) means.
pub fn handle_key_event(key: KeyEvent, status: GameStatus) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Save),
            KeyCode::Char('o') | KeyCode::Char('O') => Some(Command::Load),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Turn(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Turn(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Turn(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Turn(Direction::Down))
        }

        // Lifecycle
        KeyCode::Char(' ') | KeyCode::Enter => Some(primary_command(status)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Command::Load),

        // Speed
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::SpeedUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::SpeedDown),

        _ => None,
    }
}

fn primary_command(status: GameStatus) -> Command {
    match status {
        GameStatus::Origin => Command::Start,
        GameStatus::Running | GameStatus::Pause => Command::TogglePause,
        GameStatus::Over => Command::Restart,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// A left click on a board cell toggles a barrier there.
///
/// `locate` maps a terminal (column, row) to a board cell, or `None` when the
/// click landed outside the board.
pub fn handle_mouse_event(
    mouse: MouseEvent,
    locate: impl Fn(u16, u16) -> Option<Coordinate>,
) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            locate(mouse.column, mouse.row).map(Command::ToggleBarrier)
        }
        _ => None,
    }
}
