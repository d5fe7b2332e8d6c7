//! Gravity timer
//!
//! A tick counter that fires one downward step every `fall_speed(level)`
//! ticks. This is the only difficulty scaling in the game.

use crate::types::{FALL_SPEED_BASE, FALL_SPEED_FLOOR, FALL_SPEED_STEP};

/// Ticks per gravity step at `level`: `max(50 - level * 5, 10)`.
pub fn fall_speed(level: u32) -> u32 {
    FALL_SPEED_BASE
        .saturating_sub(level.saturating_mul(FALL_SPEED_STEP))
        .max(FALL_SPEED_FLOOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityTimer {
    ticks: u32,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Count one tick. Returns true (and rewinds) when a step is due.
    pub fn advance(&mut self, level: u32) -> bool {
        self.ticks += 1;
        if self.ticks >= fall_speed(level) {
            self.ticks = 0;
            return true;
        }
        false
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}
