//! Board module - manages the playfield grid
//!
//! The board is a 20x10 grid where each cell is empty or occupied. Occupied
//! cells remember the piece kind for coloring only; game logic looks at
//! occupancy alone. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..19 (top to bottom) and col
//! ranges 0..9 (left to right).
//!
//! The falling piece is stamped into the grid like locked cells. Moves go
//! through [`Board::fits`] (which ignores the piece's own cells) followed by
//! [`Board::relocate`], so a rejected move never touches the grid.

use arrayvec::ArrayVec;

use crate::pieces::PieceShape;
use crate::types::{Cell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (FIELD_WIDTH as usize) * (FIELD_HEIGHT as usize);

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Row indices removed by a line clear, bottom row first
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// Row-major copy of the grid
pub type Grid = [[Cell; WIDTH]; HEIGHT];

/// The playfield - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= FIELD_HEIGHT as i8 || col < 0 || col >= FIELD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, row: i8, col: i8) -> bool {
        Self::index(row, col).is_none()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Remove a row: every row above moves down by one and the top row is emptied
    pub fn clear_row(&mut self, row: usize) {
        if row >= HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..row * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Clear all full rows in a single bottom-to-top pass
    ///
    /// After a row is removed the same index is examined again, since the row
    /// above has just moved into it; stacked full rows all collapse in one call.
    /// Returns the original indices of the removed rows, bottom row first.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut row = HEIGHT;

        while row > 0 {
            let y = row - 1;
            if self.is_row_full(y) {
                // Every earlier clear sat at or below `y` and pulled this row down once.
                cleared.push(y - cleared.len());
                self.clear_row(y);
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// True if every cell is in bounds and either empty or listed in `ignore`
    ///
    /// `ignore` holds the active piece's current cells so a piece never
    /// collides with itself.
    pub fn fits(&self, cells: &PieceShape, ignore: &[(i8, i8)]) -> bool {
        cells
            .iter()
            .all(|&(r, c)| self.is_free(r, c) || (!self.is_out_of_bounds(r, c) && ignore.contains(&(r, c))))
    }

    /// Mark the given cells as occupied by `kind`
    ///
    /// Returns false (and leaves the board untouched) if any cell is out of
    /// bounds or already occupied.
    pub fn stamp(&mut self, cells: &PieceShape, kind: PieceKind) -> bool {
        if !self.fits(cells, &[]) {
            return false;
        }
        for &(r, c) in cells {
            self.set(r, c, Some(kind));
        }
        true
    }

    /// Move a stamped piece from `from` to `to` in one step
    ///
    /// Callers check [`Board::fits`] first; out-of-bounds targets are skipped.
    pub fn relocate(&mut self, from: &PieceShape, to: &PieceShape, kind: PieceKind) {
        for &(r, c) in from {
            self.set(r, c, None);
        }
        for &(r, c) in to {
            self.set(r, c, Some(kind));
        }
    }

    /// Copy the board into a 2D grid
    pub fn write_grid(&self, out: &mut Grid) {
        for (dst, src) in out.iter_mut().zip(self.cells.chunks_exact(WIDTH)) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from rows drawn as text: `#` is occupied, anything else empty
    ///
    /// The rows fill the bottom of the board; rows above them stay empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(HEIGHT).enumerate() {
            for (col, ch) in line.chars().take(WIDTH).enumerate() {
                if ch == '#' {
                    board.set((offset + i) as i8, col as i8, Some(PieceKind::O));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
