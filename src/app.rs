//! Per-tick driver tying the engine to effects and high-score storage.

use crossterm::event::KeyEvent;
use tracing::{info, warn};

use crate::core::{ActionOutcome, Effects, GameSnapshot, GameState};
use crate::input::press_to_action;
use crate::store::HighScoreStore;
use crate::types::GameAction;

/// One running game plus everything the engine signals outward.
///
/// After each action or tick the engine's one-shot outputs are drained: a
/// lock that cleared rows starts row flashes, a new high score is written to
/// the store, and a new run drops old flashes and restarts the fade-in.
pub struct App<S: HighScoreStore> {
    game: GameState,
    effects: Effects,
    store: S,
    snapshot: GameSnapshot,
    episode_seen: u32,
}

impl<S: HighScoreStore> App<S> {
    /// Load the high score from `store` and open on the menu.
    pub fn new(seed: u32, store: S) -> Self {
        let high_score = store.load();
        info!(seed, high_score, "starting");
        let game = GameState::new(seed, high_score);
        let snapshot = game.snapshot();
        let episode_seen = game.episode_id();
        Self {
            game,
            effects: Effects::new(),
            store,
            snapshot,
            episode_seen,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Direct engine access (tests, scripted setups).
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// View as of the last action or tick.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Apply one player action.
    pub fn handle(&mut self, action: GameAction) -> ActionOutcome {
        let outcome = self.game.apply_action(action);
        if outcome == ActionOutcome::Exit {
            info!(phase = self.game.phase().as_str(), "exit requested");
        }
        self.sync();
        outcome
    }

    /// Map a key press under the current phase and apply it.
    ///
    /// Keys that mean nothing in this phase are `Ignored`.
    pub fn handle_key(&mut self, key: KeyEvent) -> ActionOutcome {
        match press_to_action(key, self.game.phase()) {
            Some(action) => self.handle(action),
            None => ActionOutcome::Ignored,
        }
    }

    /// Advance one 60 Hz frame: gravity, then effect decay.
    pub fn tick(&mut self) {
        self.game.tick();
        self.sync();
        self.effects.advance();
    }

    fn sync(&mut self) {
        if let Some(event) = self.game.take_last_event() {
            self.effects.flash_rows(&event.cleared_rows);
        }

        if let Some(score) = self.game.take_high_score_save() {
            if let Err(e) = self.store.save(score) {
                warn!(score, error = %format!("{e:#}"), "failed to save high score");
            }
        }

        if self.game.episode_id() != self.episode_seen {
            self.episode_seen = self.game.episode_id();
            self.effects.clear_flashes();
            self.effects.restart_fade();
        }

        self.game.snapshot_into(&mut self.snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryHighScoreStore;
    use crate::types::Phase;

    #[test]
    fn loads_high_score_on_start() {
        let app = App::new(3, MemoryHighScoreStore::new(900));
        assert_eq!(app.snapshot().high_score, 900);
        assert_eq!(app.snapshot().phase, Phase::Menu);
    }

    #[test]
    fn start_restarts_fade() {
        let mut app = App::new(3, MemoryHighScoreStore::new(0));
        assert!(app.effects().fade().is_done());

        app.handle(GameAction::Start);
        assert_eq!(app.effects().fade().alpha, u8::MAX);
        assert_eq!(app.snapshot().phase, Phase::Playing);
    }
}
