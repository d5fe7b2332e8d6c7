//! Non-blocking per-tick keyboard polling.
//!
//! Polling only collects key presses. Mapping to a [`GameAction`] is left to
//! the caller, which must do it right before applying each one: an earlier
//! key in the same batch may already have changed the phase.

use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{GameAction, Phase};

/// Most key presses collected in one tick; extra presses are dropped.
pub const MAX_KEYS_PER_TICK: usize = 16;

pub type TickKeys = ArrayVec<KeyEvent, MAX_KEYS_PER_TICK>;

/// Collects key presses, in arrival order.
///
/// Only `Press` events count: terminal auto-repeat and release events are
/// dropped so every physical press yields at most one action.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    resized: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain pending terminal events, waiting at most `timeout` for the first.
    pub fn poll(&mut self, timeout: Duration) -> Result<TickKeys> {
        let mut out = TickKeys::new();
        let mut wait = timeout;

        while event::poll(wait)? {
            wait = Duration::ZERO;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if out.try_push(key).is_err() {
                        break;
                    }
                }
                Event::Resize(_, _) => self.resized = true,
                _ => {}
            }
        }

        Ok(out)
    }

    /// Whether the terminal was resized since the last call.
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}

/// Map a key event if it is a fresh press.
pub fn press_to_action(key: KeyEvent, phase: Phase) -> Option<GameAction> {
    match key.kind {
        KeyEventKind::Press => map_key(key, phase),
        KeyEventKind::Repeat | KeyEventKind::Release => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn repeat_and_release_are_dropped() {
        let mut key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(press_to_action(key, Phase::Playing), Some(GameAction::MoveLeft));

        key.kind = KeyEventKind::Repeat;
        assert_eq!(press_to_action(key, Phase::Playing), None);

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(press_to_action(release, Phase::Playing), None);
    }
}
