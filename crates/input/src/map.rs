//! Key mapping from terminal events to game commands.

use crate::types::{Difficulty, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::SoftDrop),

        // Rotation (clockwise only)
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GameAction::Rotate),

        // Only honored once a game is over
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Difficulty picked with the number row: 1 easy, 2 medium, 3 hard.
pub fn difficulty_for_key(key: KeyEvent) -> Option<Difficulty> {
    match key.code {
        KeyCode::Char('1') => Some(Difficulty::Easy),
        KeyCode::Char('2') => Some(Difficulty::Medium),
        KeyCode::Char('3') => Some(Difficulty::Hard),
        _ => None,
    }
}

/// Check if key starts a new game.
pub fn is_start_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
