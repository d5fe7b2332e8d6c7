//! Tracing setup.
//!
//! The terminal is owned by the renderer while the game runs, so log lines go
//! to a file instead of stderr. Without `TETRIS_LOG_PATH` no subscriber is
//! installed and every `tracing` call is a no-op.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use crate::config::AppConfig;

/// Install the global subscriber. Returns false when logging is disabled.
pub fn init(config: &AppConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(config.log_level))
        .try_init()
        .context("installing tracing subscriber")?;

    info!(level = %config.log_level, "logging initialized");
    Ok(true)
}
