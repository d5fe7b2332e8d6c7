//! Key mapping from terminal events to game actions.
//!
//! The same key can mean different things depending on the phase: Space
//! starts a run from the menu but toggles pause in play, Esc exits from the
//! menu but returns to it from a run.

use crate::types::{GameAction, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action for the current phase.
pub fn map_key(key: KeyEvent, phase: Phase) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match phase {
        Phase::Menu => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Start),
            KeyCode::Esc => Some(GameAction::Back),
            _ => None,
        },
        Phase::Playing => match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(GameAction::MoveLeft)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(GameAction::MoveRight)
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
                Some(GameAction::SoftDrop)
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(GameAction::Rotate)
            }
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::PauseToggle),
            KeyCode::Esc => Some(GameAction::Back),
            _ => None,
        },
        Phase::Paused => match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::PauseToggle),
            _ => None,
        },
        Phase::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
            KeyCode::Esc => Some(GameAction::Back),
            _ => None,
        },
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(map_key(key(KeyCode::Char(' ')), Phase::Menu), Some(GameAction::Start));
        assert_eq!(map_key(key(KeyCode::Esc), Phase::Menu), Some(GameAction::Back));
        assert_eq!(map_key(key(KeyCode::Left), Phase::Menu), None);
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(key(KeyCode::Left), Phase::Playing), Some(GameAction::MoveLeft));
        assert_eq!(map_key(key(KeyCode::Right), Phase::Playing), Some(GameAction::MoveRight));
        assert_eq!(map_key(key(KeyCode::Down), Phase::Playing), Some(GameAction::SoftDrop));
        assert_eq!(map_key(key(KeyCode::Up), Phase::Playing), Some(GameAction::Rotate));

        assert_eq!(map_key(key(KeyCode::Char('H')), Phase::Playing), Some(GameAction::MoveLeft));
        assert_eq!(map_key(key(KeyCode::Char('d')), Phase::Playing), Some(GameAction::MoveRight));
        assert_eq!(map_key(key(KeyCode::Char('J')), Phase::Playing), Some(GameAction::SoftDrop));
        assert_eq!(map_key(key(KeyCode::Char('w')), Phase::Playing), Some(GameAction::Rotate));
    }

    #[test]
    fn test_space_depends_on_phase() {
        assert_eq!(map_key(key(KeyCode::Char(' ')), Phase::Playing), Some(GameAction::PauseToggle));
        assert_eq!(map_key(key(KeyCode::Char(' ')), Phase::Paused), Some(GameAction::PauseToggle));
        assert_eq!(map_key(key(KeyCode::Char(' ')), Phase::GameOver), None);
    }

    #[test]
    fn test_paused_drops_movement() {
        assert_eq!(map_key(key(KeyCode::Left), Phase::Paused), None);
        assert_eq!(map_key(key(KeyCode::Esc), Phase::Paused), None);
    }

    #[test]
    fn test_game_over_keys() {
        assert_eq!(map_key(key(KeyCode::Char('r')), Phase::GameOver), Some(GameAction::Restart));
        assert_eq!(map_key(key(KeyCode::Esc), Phase::GameOver), Some(GameAction::Back));
        assert_eq!(map_key(key(KeyCode::Char('r')), Phase::Playing), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(key(KeyCode::Char('x'))));
        for phase in [Phase::Menu, Phase::Playing, Phase::Paused, Phase::GameOver] {
            assert_eq!(map_key(key(KeyCode::Char('Q')), phase), Some(GameAction::Quit));
        }
    }
}
