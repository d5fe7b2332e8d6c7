//! Active piece - the piece currently under player and gravity control

use crate::pieces::{catalog_shape, Shape};
use crate::types::{PieceKind, Rgb, GRID_WIDTH};

/// Falling piece: a (possibly rotated) shape, its kind, and the grid offset of
/// its bounding box's top-left corner.
///
/// `x` is the column and `y` the row. `y` may be negative while a piece
/// pokes out above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Create a piece of `kind` at its spawn position: horizontally centered,
    /// top row at 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = catalog_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Copy translated by `(dx, dy)`.
    pub fn shifted(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy with the shape rotated 90° clockwise in place.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Absolute `(row, col)` grid coordinates of the filled cells.
    pub fn grid_cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .map(move |(i, j)| (self.y + i as i16, self.x + j as i16))
    }
}

/// Spawn column for a shape: `floor(width / 2) - floor(cols / 2)`.
pub fn spawn_x(shape: &Shape) -> i16 {
    (GRID_WIDTH / 2) as i16 - (shape.cols() / 2) as i16
}
