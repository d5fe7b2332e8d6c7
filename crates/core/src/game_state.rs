//! Game state module - the engine and its phase state machine
//!
//! `GameState` owns everything that changes during play: the grid, the active
//! and next pieces, the counters, the gravity timer and the phase. Callers
//! feed it actions and ticks; it never performs I/O. Persistence and effects
//! are signalled through one-shot values the caller drains each tick
//! ([`GameState::take_last_event`], [`GameState::take_high_score_save`]).

use tracing::{debug, info};

use crate::collision::{piece_fits, try_rotate, try_shift};
use crate::grid::{ClearedRows, Grid};
use crate::gravity::GravityTimer;
use crate::piece::ActivePiece;
use crate::rng::PieceCatalog;
use crate::scoring::Scoreboard;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// What an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action changed state (a committed move, a phase change, ...).
    Applied,
    /// Not legal in the current phase, or the move was blocked.
    Ignored,
    /// The program should terminate.
    Exit,
}

/// Emitted once per lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Cleared row indices (pre-clear numbering), bottom to top.
    pub cleared_rows: ClearedRows,
    pub points: u32,
    pub new_high_score: Option<u32>,
    /// The promoted piece collided at spawn.
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: ActivePiece,
    next: ActivePiece,
    catalog: PieceCatalog,
    scoreboard: Scoreboard,
    gravity: GravityTimer,
    phase: Phase,
    /// Increments on every full reset.
    episode_id: u32,
    last_event: Option<LockEvent>,
    pending_high_score_save: Option<u32>,
}

impl GameState {
    /// Create a game in the menu phase.
    ///
    /// `high_score` is the value loaded from the high-score store.
    pub fn new(seed: u32, high_score: u32) -> Self {
        let mut catalog = PieceCatalog::new(seed);
        let active = catalog.sample();
        let next = catalog.sample();

        Self {
            grid: Grid::new(),
            active,
            next,
            catalog,
            scoreboard: Scoreboard::new(high_score),
            gravity: GravityTimer::new(),
            phase: Phase::Menu,
            episode_id: 0,
            last_event: None,
            pending_high_score_save: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for setting up positions (tests, tools).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// Replace the active piece (setup only; not validated).
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    pub fn next(&self) -> &ActivePiece {
        &self.next
    }

    /// Replace the next-piece buffer (setup only).
    pub fn set_next(&mut self, piece: ActivePiece) {
        self.next = piece;
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn level(&self) -> u32 {
        self.scoreboard.level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.scoreboard.lines_cleared()
    }

    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn gravity(&self) -> &GravityTimer {
        &self.gravity
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Start a fresh run: empty grid, new active and next pieces, zeroed
    /// counters (high score kept), gravity rewound. Enters `Playing`.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.active = self.catalog.sample();
        self.next = self.catalog.sample();
        self.scoreboard.reset();
        self.gravity.reset();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.last_event = None;
        self.set_phase(Phase::Playing);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!(from = self.phase.as_str(), to = phase.as_str(), "phase change");
            self.phase = phase;
        }
    }

    /// Apply one player request according to the phase table.
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        use ActionOutcome::*;

        if action == GameAction::Quit {
            return Exit;
        }

        match (self.phase, action) {
            (Phase::Menu, GameAction::Start) => {
                self.reset();
                Applied
            }
            (Phase::Menu, GameAction::Back) => Exit,

            (Phase::Playing, GameAction::MoveLeft) => applied_if(self.move_left()),
            (Phase::Playing, GameAction::MoveRight) => applied_if(self.move_right()),
            (Phase::Playing, GameAction::SoftDrop) => {
                // A blocked soft drop locks, which is still a state change.
                self.move_down();
                Applied
            }
            (Phase::Playing, GameAction::Rotate) => applied_if(self.rotate()),
            (Phase::Playing, GameAction::PauseToggle) => {
                self.set_phase(Phase::Paused);
                Applied
            }
            (Phase::Playing, GameAction::Back) => {
                self.set_phase(Phase::Menu);
                Applied
            }

            (Phase::Paused, GameAction::PauseToggle) => {
                self.set_phase(Phase::Playing);
                Applied
            }

            (Phase::GameOver, GameAction::Restart) => {
                self.reset();
                Applied
            }
            (Phase::GameOver, GameAction::Back) => {
                self.set_phase(Phase::Menu);
                Applied
            }

            _ => Ignored,
        }
    }

    /// Shift the active piece one column left if legal.
    pub fn move_left(&mut self) -> bool {
        self.phase == Phase::Playing && try_shift(&self.grid, &mut self.active, -1, 0)
    }

    /// Shift the active piece one column right if legal.
    pub fn move_right(&mut self) -> bool {
        self.phase == Phase::Playing && try_shift(&self.grid, &mut self.active, 1, 0)
    }

    /// Move the active piece down one row.
    ///
    /// Returns true if it descended. If it cannot, the piece is locked (merge,
    /// line clear, next piece promoted) and false is returned.
    pub fn move_down(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if try_shift(&self.grid, &mut self.active, 0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Rotate the active piece clockwise if the rotated shape fits in place.
    pub fn rotate(&mut self) -> bool {
        self.phase == Phase::Playing && try_rotate(&self.grid, &mut self.active)
    }

    /// Advance one loop iteration: count a gravity tick and, when due, move
    /// the piece down (locking it if it cannot descend).
    ///
    /// Returns true if a gravity step ran. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if !self.gravity.advance(self.scoreboard.level()) {
            return false;
        }
        self.move_down();
        true
    }

    /// Merge, clear, score, promote the next piece, and detect game over.
    fn lock_piece(&mut self) {
        if !self.grid.merge(&self.active) {
            // Only reachable if the active piece was placed illegally by setup.
            tracing::error!(x = self.active.x, y = self.active.y, "lock target overlaps grid");
        }

        let cleared_rows = self.grid.clear_full_rows();
        let clear = self.scoreboard.record_clear(cleared_rows.len() as u32);
        debug!(
            kind = self.active.kind.as_str(),
            lines = clear.lines,
            points = clear.points,
            level = clear.level_after,
            "piece locked"
        );

        if let Some(high) = clear.new_high_score {
            info!(high_score = high, "new high score");
            self.pending_high_score_save = Some(high);
        }

        self.active = self.next;
        self.next = self.catalog.sample();

        let game_over = !piece_fits(&self.grid, &self.active);
        if game_over {
            info!(
                score = self.scoreboard.score(),
                lines = self.scoreboard.lines_cleared(),
                "spawn blocked"
            );
            self.set_phase(Phase::GameOver);
        }

        self.last_event = Some(LockEvent {
            cleared_rows,
            points: clear.points,
            new_high_score: clear.new_high_score,
            game_over,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Take the pending high-score persistence request, if any.
    pub fn take_high_score_save(&mut self) -> Option<u32> {
        self.pending_high_score_save.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.active = self.active;
        out.next = self.next;
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.score = self.scoreboard.score();
        out.level = self.scoreboard.level();
        out.lines_cleared = self.scoreboard.lines_cleared();
        out.high_score = self.scoreboard.high_score();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot {
            grid: [[None; GRID_WIDTH]; GRID_HEIGHT],
            active: self.active,
            next: self.next,
            phase: self.phase,
            episode_id: 0,
            score: 0,
            level: 1,
            lines_cleared: 0,
            high_score: 0,
        };
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

fn applied_if(changed: bool) -> ActionOutcome {
    if changed {
        ActionOutcome::Applied
    } else {
        ActionOutcome::Ignored
    }
}
