//! # Grid Model
//!
//! The N×N cell matrix plus placement accounting.
//!
//! The grid is created all-blocked, mutated only through the placement
//! engine during synthesis, and frozen inside the puzzle record on
//! completion. Two invariants hold at all times: adjacency (no two words
//! touch side-by-side without sharing a cell) and termination (the cell
//! before a word's first grapheme and after its last is blocked). The
//! placement engine enforces both; the grid only stores cells.

use crate::types::{Cell, Grapheme, KurosuError};
use serde::{Deserialize, Serialize};

/// An N×N crossword grid.
///
/// Cells are stored row-major; `(row, col)` indexing is bounds-checked on
/// the public accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid of the given size, all cells blocked.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Blocked; size * size],
        }
    }

    /// Grid side length N.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Whether `(row, col)` is in bounds and carries a letter.
    #[must_use]
    pub fn is_letter(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_letter)
    }

    /// Whether `(row, col)` is out of bounds or blocked.
    ///
    /// Out-of-bounds counts as blocked for invariant checks: a word
    /// ending at the grid edge needs no terminator cell.
    #[must_use]
    pub fn is_blocked_or_edge(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return true;
        }
        match self.get(row as usize, col as usize) {
            None => true,
            Some(cell) => cell.is_blocked(),
        }
    }

    /// Write a cell. Internal to the crate; all mutation flows through
    /// the placement engine and numbering pass.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), KurosuError> {
        if row >= self.size || col >= self.size {
            return Err(KurosuError::BadRequest(format!(
                "cell ({row}, {col}) out of bounds for size {}",
                self.size
            )));
        }
        self.cells[row * self.size + col] = cell;
        Ok(())
    }

    /// Iterate all letter cells in reading order: `(row, col, grapheme)`.
    pub fn letter_cells(&self) -> impl Iterator<Item = (usize, usize, Grapheme)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.grapheme()
                .map(|g| (idx / self.size, idx % self.size, g))
        })
    }

    /// Number of letter cells.
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_letter()).count()
    }

    /// Letter-cell count divided by N². Logging and reporting only;
    /// score comparisons use the integer letter count.
    #[must_use]
    pub fn density(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        self.letter_count() as f64 / (self.size * self.size) as f64
    }

    /// Whether the fill rate meets a percentage target.
    #[must_use]
    pub fn meets_density_percent(&self, percent: usize) -> bool {
        // Integer comparison: letters * 100 >= percent * N².
        self.letter_count() * 100 >= percent * self.size * self.size
    }
}

// =============================================================================
// TESTS
// =============================================================================
