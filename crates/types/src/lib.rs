//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! shared by the engine, the renderer and the input layer alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing and Difficulty
//!
//! The game advances in fixed ticks at [`TICKS_PER_SECOND`]. Gravity is
//! measured in ticks per row:
//!
//! | Level | Ticks per row |
//! |-------|---------------|
//! | 1 | 45 |
//! | 2 | 40 |
//! | 5 | 25 |
//! | 8+ | 10 (floor) |
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{PieceKind, GRID_HEIGHT, GRID_WIDTH, YELLOW};
//!
//! assert_eq!(PieceKind::O.color(), YELLOW);
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: usize = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: usize = 20;

/// Fixed loop rate (60 ticks per second)
pub const TICKS_PER_SECOND: u32 = 60;

/// Gravity interval at level 0, in ticks
pub const FALL_SPEED_BASE: u32 = 50;

/// Ticks shaved off the gravity interval per level
pub const FALL_SPEED_STEP: u32 = 5;

/// Fastest gravity interval, in ticks
pub const FALL_SPEED_FLOOR: u32 = 10;

/// Points per cleared line, before the level multiplier
pub const POINTS_PER_LINE: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Largest bounding box side of any piece shape
pub const MAX_SHAPE_SIDE: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameplay_constants() {
        assert_eq!(GRID_WIDTH, 10);
        assert_eq!(GRID_HEIGHT, 20);
        assert_eq!(TICKS_PER_SECOND, 60);
        assert_eq!(FALL_SPEED_BASE, 50);
        assert_eq!(FALL_SPEED_STEP, 5);
        assert_eq!(FALL_SPEED_FLOOR, 10);
        assert_eq!(POINTS_PER_LINE, 100);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn catalog_order_and_colors() {
        assert_eq!(PieceKind::ALL.len(), 7);
        assert_eq!(PieceKind::I.color(), Rgb::new(0, 255, 255));
        assert_eq!(PieceKind::L.color(), Rgb::new(255, 165, 0));
        assert_eq!(PieceKind::Z.color(), Rgb::new(255, 0, 0));
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn rgb_scaling_and_blending() {
        assert_eq!(RED.scaled(255), RED);
        assert_eq!(RED.scaled(0), BLACK);
        assert_eq!(BLACK.blend(WHITE, 255), WHITE);
        assert_eq!(BLACK.blend(WHITE, 0), BLACK);
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `alpha / 255` (blend toward black).
    pub fn scaled(self, alpha: u8) -> Self {
        let f = |c: u8| ((c as u16 * alpha as u16) / 255) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Linear blend from `self` toward `other` by `alpha / 255`.
    pub fn blend(self, other: Rgb, alpha: u8) -> Self {
        let a = alpha as u16;
        let f = |from: u8, to: u8| ((from as u16 * (255 - a) + to as u16 * a) / 255) as u8;
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
}

pub const CYAN: Rgb = Rgb::new(0, 255, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// The seven tetromino piece kinds, in catalog order
///
/// Each piece has a fixed color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta
/// - **L**: Orange
/// - **J**: Blue
/// - **S**: Green
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// The fixed color cells of this kind are painted with.
    pub fn color(self) -> Rgb {
        match self {
            PieceKind::I => CYAN,
            PieceKind::O => YELLOW,
            PieceKind::T => MAGENTA,
            PieceKind::L => ORANGE,
            PieceKind::J => BLUE,
            PieceKind::S => GREEN,
            PieceKind::Z => RED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Locked cell painted with the color of the piece that filled it
pub type Cell = Option<Rgb>;

/// Top-level game phase.
///
/// `Menu` is the initial phase. The engine only mutates while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Discrete player requests delivered once per tick by the input source
///
/// Each request is instantaneous and idempotent; whether it has any effect
/// depends on the current [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks the piece when it cannot descend
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Pause or resume
    PauseToggle,
    /// Start a run from the menu
    Start,
    /// Start a fresh run after game over
    Restart,
    /// Leave the current screen (back to menu, or exit from the menu)
    Back,
    /// Quit the program from anywhere
    Quit,
}
