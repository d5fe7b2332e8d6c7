//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the piece catalog, the grid, the
//! active piece, collision and rotation, line clearing and scoring, gravity,
//! and the menu/playing/paused/game-over state machine. It has no
//! dependencies on the terminal, the keyboard or the filesystem.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven catalog shapes and clockwise matrix rotation
//! - [`piece`]: the active piece (shape + grid offset)
//! - [`grid`]: 10x20 locked-cell matrix, row queries, line clearing, merge
//! - [`collision`]: placement legality, validated moves and rotation
//! - [`scoring`]: points, level progression, high score
//! - [`gravity`]: tick-counting gravity timer
//! - [`rng`]: seeded uniform piece sampling
//! - [`game_state`]: the engine and phase state machine
//! - [`snapshot`]: read-only per-tick view for renderers
//! - [`effects`]: transient row-flash and fade-in effects
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{ActionOutcome, GameState};
//! use classic_tetris_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345, 0);
//! assert_eq!(game.phase(), Phase::Menu);
//!
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick();
//!
//! assert_eq!(game.apply_action(GameAction::Quit), ActionOutcome::Exit);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per loop
//! iteration at 60 Hz, after applying that iteration's input.

pub mod collision;
pub mod effects;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

pub use collision::{is_valid, try_rotate, try_shift};
pub use effects::{Effects, FadeIn, RowFlash};
pub use game_state::{ActionOutcome, GameState, LockEvent};
pub use gravity::{fall_speed, GravityTimer};
pub use grid::{ClearedRows, Grid};
pub use piece::ActivePiece;
pub use pieces::{catalog_shape, Shape};
pub use rng::{PieceCatalog, SimpleRng};
pub use scoring::{level_for_lines, line_clear_points, ClearScore, Scoreboard};
pub use snapshot::GameSnapshot;
