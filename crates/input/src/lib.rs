//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s according to
//! the current phase, and polls the terminal once per tick without blocking
//! past the tick deadline.

pub mod map;
pub mod poll;

pub use classic_tetris_types as types;

pub use map::{map_key, should_quit};
pub use poll::{press_to_action, KeyboardInput, TickKeys, MAX_KEYS_PER_TICK};
