//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a framebuffer of styled
//! cells, and [`TerminalRenderer`] flushes only the cells that changed since
//! the previous frame. No widget toolkit, no layout engine.
//!
//! Each grid cell is drawn 2 columns wide to compensate for the typical
//! terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, FrameStats, TerminalRenderer};
