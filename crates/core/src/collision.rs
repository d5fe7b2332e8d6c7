//! Collision and rotation checks
//!
//! Placement legality is deliberately asymmetric:
//! - a cell left of column 0 or right of the last column is always illegal
//! - a cell at or below the bottom edge is always illegal
//! - a cell above row 0 is legal, and skips the occupancy test
//!
//! The last rule lets a piece spawn partially above the visible grid.

use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::pieces::Shape;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Whether `shape` placed with its top-left corner at column `x`, row `y`
/// fits on `grid`.
pub fn is_valid(grid: &Grid, shape: &Shape, x: i16, y: i16) -> bool {
    shape.cells().all(|(i, j)| {
        let row = y + i as i16;
        let col = x + j as i16;
        if col < 0 || col >= GRID_WIDTH as i16 || row >= GRID_HEIGHT as i16 {
            return false;
        }
        row < 0 || !grid.is_occupied(row, col)
    })
}

/// Whether the piece fits where it currently is.
pub fn piece_fits(grid: &Grid, piece: &ActivePiece) -> bool {
    is_valid(grid, &piece.shape, piece.x, piece.y)
}

/// Translate the piece by `(dx, dy)` if the destination is legal.
///
/// Returns true if the move was committed; otherwise the piece is untouched.
pub fn try_shift(grid: &Grid, piece: &mut ActivePiece, dx: i16, dy: i16) -> bool {
    if !is_valid(grid, &piece.shape, piece.x + dx, piece.y + dy) {
        return false;
    }
    *piece = piece.shifted(dx, dy);
    true
}

/// Rotate the piece clockwise in place if the rotated shape fits at the
/// current offset. No kicks are attempted; an illegal rotation is dropped.
pub fn try_rotate(grid: &Grid, piece: &mut ActivePiece) -> bool {
    let rotated = piece.shape.rotated();
    if !is_valid(grid, &rotated, piece.x, piece.y) {
        return false;
    }
    piece.shape = rotated;
    true
}
