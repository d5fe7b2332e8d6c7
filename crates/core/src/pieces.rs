//! Pieces module - tetromino shape matrices and rotation
//!
//! A shape is a small row-major occupancy matrix (at most 4x4) describing the
//! piece's cells inside its local bounding box. Rotation turns the matrix 90°
//! clockwise by reversing the row order and transposing. There is no wall
//! kick search: callers validate the rotated copy in place and discard it if
//! it does not fit.

use crate::types::{PieceKind, MAX_SHAPE_SIDE};

/// Occupancy matrix of a piece inside its bounding box.
///
/// Cells outside `rows x cols` are always `false`, so two shapes compare
/// equal exactly when their visible matrices are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from matrix rows of 0/1 values.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4. Only used
    /// for compile-time catalog data and tests.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_SIDE);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_SIDE);

        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape matrix");
            for (j, &v) in row.iter().enumerate() {
                bits[i][j] = v != 0;
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    /// Number of rows in the bounding box
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Number of columns in the bounding box
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether local cell `(row, col)` is filled. Out-of-box cells are empty.
    #[inline(always)]
    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits[row][col]
    }

    /// Iterate the filled cells as `(row, col)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows())
            .flat_map(move |i| (0..self.cols()).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.bits[i][j])
    }

    /// Rotated copy, 90° clockwise.
    ///
    /// Reverse the row order, then transpose: `out[i][j] = in[rows-1-j][i]`.
    /// The result has `cols x rows` dimensions.
    pub fn rotated(&self) -> Self {
        let rows = self.rows();
        let cols = self.cols();
        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.bits[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// The catalog shape for a piece kind, in spawn orientation.
pub fn catalog_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
        PieceKind::L => Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
        PieceKind::J => Shape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
        PieceKind::S => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::Z => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
    }
}
