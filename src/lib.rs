//! Classic Tetris (workspace facade crate).
//!
//! The game rules live in `crates/core`, keyboard mapping in `crates/input`,
//! rendering in `crates/term` and high-score persistence in `crates/store`.
//! This package re-exports them under one name and adds the pieces that glue
//! them into a program: environment configuration, logging setup and the
//! per-tick [`App`] driver.

pub mod app;
pub mod config;
pub mod logging;

pub use classic_tetris_core as core;
pub use classic_tetris_input as input;
pub use classic_tetris_store as store;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;

pub use app::App;
pub use config::AppConfig;
