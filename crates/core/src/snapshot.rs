use crate::piece::ActivePiece;
use crate::types::{Cell, Phase, GRID_HEIGHT, GRID_WIDTH};

/// Read-only per-tick view of the engine for renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_WIDTH]; GRID_HEIGHT],
    pub active: ActivePiece,
    pub next: ActivePiece,
    pub phase: Phase,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub high_score: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Whether the play field is on screen (every phase but the menu).
    pub fn shows_field(&self) -> bool {
        self.phase != Phase::Menu
    }
}
