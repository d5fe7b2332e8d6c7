//! Transient render effects
//!
//! Short-lived value objects the renderer draws on top of a snapshot: a flash
//! over each freshly cleared row and a fade-in at the start of every run.
//! They are advanced once per frame by the caller and never touch the grid or
//! the score.

use crate::types::GRID_WIDTH;

/// Nominal full width of a row flash (30 units per column).
pub const ROW_FLASH_WIDTH: u16 = GRID_WIDTH as u16 * 30;

const ROW_FLASH_ALPHA_STEP: u8 = 15;
const ROW_FLASH_WIDTH_STEP: u16 = 20;
const FADE_IN_STEP: u8 = 5;

/// Flash over a cleared row: fades and narrows each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFlash {
    pub row: usize,
    pub alpha: u8,
    pub width: u16,
}

impl RowFlash {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            alpha: u8::MAX,
            width: ROW_FLASH_WIDTH,
        }
    }

    /// Step one frame. Returns false once the flash has expired.
    pub fn decay(&mut self) -> bool {
        self.alpha = self.alpha.saturating_sub(ROW_FLASH_ALPHA_STEP);
        self.width = self.width.saturating_sub(ROW_FLASH_WIDTH_STEP);
        !self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.alpha == 0 || self.width == 0
    }

    /// Fraction of the row still covered, in `0.0..=1.0`.
    pub fn coverage(&self) -> f32 {
        self.width as f32 / ROW_FLASH_WIDTH as f32
    }
}

/// Black overlay that fades out at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeIn {
    pub alpha: u8,
}

impl FadeIn {
    pub fn new() -> Self {
        Self { alpha: u8::MAX }
    }

    /// A fade that has already run out.
    pub fn finished() -> Self {
        Self { alpha: 0 }
    }

    pub fn decay(&mut self) {
        self.alpha = self.alpha.saturating_sub(FADE_IN_STEP);
    }

    pub fn is_done(&self) -> bool {
        self.alpha == 0
    }
}

impl Default for FadeIn {
    fn default() -> Self {
        Self::new()
    }
}

/// All live effects for one frame.
///
/// Starts idle: the fade-in only runs once a run begins.
#[derive(Debug, Clone)]
pub struct Effects {
    flashes: Vec<RowFlash>,
    fade: FadeIn,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            flashes: Vec::new(),
            fade: FadeIn::finished(),
        }
    }
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a flash over each of `rows` (pre-clear indices).
    pub fn flash_rows(&mut self, rows: &[usize]) {
        self.flashes.extend(rows.iter().map(|&row| RowFlash::new(row)));
    }

    /// Restart the fade-in (new run).
    pub fn restart_fade(&mut self) {
        self.fade = FadeIn::new();
    }

    /// Drop every live row flash.
    pub fn clear_flashes(&mut self) {
        self.flashes.clear();
    }

    /// Step every effect by one frame and drop expired flashes.
    pub fn advance(&mut self) {
        self.flashes.retain_mut(|f| f.decay());
        self.fade.decay();
    }

    pub fn flashes(&self) -> &[RowFlash] {
        &self.flashes
    }

    pub fn fade(&self) -> FadeIn {
        self.fade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_flash_expires_when_width_runs_out() {
        let mut flash = RowFlash::new(19);
        let mut frames = 0;
        while flash.decay() {
            frames += 1;
        }
        // Width 300 shrinks by 20 per frame and hits zero first (15 frames);
        // alpha 255 would last 17.
        assert_eq!(frames, 14);
        assert_eq!(flash.width, 0);
        assert_eq!(flash.alpha, 30);
    }

    #[test]
    fn test_fade_in_takes_51_frames() {
        let mut fade = FadeIn::new();
        let mut frames = 0;
        while !fade.is_done() {
            fade.decay();
            frames += 1;
        }
        assert_eq!(frames, 51);
    }

    #[test]
    fn test_effects_drop_expired_flashes() {
        let mut fx = Effects::new();
        fx.flash_rows(&[18, 19]);
        assert_eq!(fx.flashes().len(), 2);
        for _ in 0..15 {
            fx.advance();
        }
        assert!(fx.flashes().is_empty());
    }

    #[test]
    fn test_new_effects_start_without_fade() {
        let mut fx = Effects::new();
        assert!(fx.fade().is_done());
        assert!(fx.flashes().is_empty());

        fx.restart_fade();
        assert_eq!(fx.fade().alpha, u8::MAX);
    }

    #[test]
    fn test_clear_flashes_keeps_fade() {
        let mut fx = Effects::new();
        fx.restart_fade();
        fx.flash_rows(&[3, 5]);
        fx.clear_flashes();
        assert!(fx.flashes().is_empty());
        assert_eq!(fx.fade().alpha, u8::MAX);
    }
}
