//! Grid module - the matrix of locked cells
//!
//! The grid is a fixed 10x20 matrix where each cell is empty or holds the
//! color of the piece that locked there. Storage is a flat row-major array so
//! row shifts are plain `copy_within` calls and nothing allocates.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 the left edge.

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// Row indices removed by one clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, GRID_HEIGHT>;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major cells (row * WIDTH + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= GRID_HEIGHT as i16 || col < 0 || col >= GRID_WIDTH as i16 {
            return None;
        }
        Some(row as usize * GRID_WIDTH + col as usize)
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(row, col)`. Returns false if out of range.
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether the cell holds a color. Out-of-range cells report false.
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// The cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * GRID_WIDTH;
        &self.cells[start..start + GRID_WIDTH]
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, row: usize) -> bool {
        if row >= GRID_HEIGHT {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Remove one row, shift every row above it down by one and empty the
    /// top row. Returns false if `row` is out of range.
    pub fn clear_row(&mut self, row: usize) -> bool {
        if row >= GRID_HEIGHT {
            return false;
        }

        for r in (1..=row).rev() {
            let src = (r - 1) * GRID_WIDTH;
            self.cells.copy_within(src..src + GRID_WIDTH, r * GRID_WIDTH);
        }
        self.cells[..GRID_WIDTH].fill(None);

        true
    }

    /// Remove every full row in a single pass.
    ///
    /// Full rows are identified against the pre-clear grid. Surviving rows
    /// are compacted downward from the bottom, then the vacated top rows are
    /// emptied, so exactly the identified rows disappear no matter how many
    /// there are or whether they are adjacent. Returns the removed indices,
    /// bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_row = GRID_HEIGHT;

        for read_row in (0..GRID_HEIGHT).rev() {
            if self.row_is_full(read_row) {
                cleared.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * GRID_WIDTH;
                    self.cells
                        .copy_within(src..src + GRID_WIDTH, write_row * GRID_WIDTH);
                }
            }
        }

        self.cells[..write_row * GRID_WIDTH].fill(None);
        cleared
    }

    /// Write the piece's filled cells into the grid using its color.
    ///
    /// Every target cell must be on the grid and empty; if any is not, nothing
    /// is written and false is returned.
    pub fn merge(&mut self, piece: &ActivePiece) -> bool {
        let fits = piece
            .grid_cells()
            .all(|(row, col)| matches!(self.get(row, col), Some(None)));
        if !fits {
            return false;
        }

        let color = piece.color();
        for (row, col) in piece.grid_cells() {
            self.set(row, col, Some(color));
        }
        true
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array (snapshot form).
    pub fn write_rows(&self, out: &mut [[Cell; GRID_WIDTH]; GRID_HEIGHT]) {
        for (r, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(r));
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
