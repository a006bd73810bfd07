//! Boolean wall matrices
//!
//! One `WallGrid` holds the vertical walls (`rows × (cols-1)`), another the
//! horizontal walls (`(rows-1) × cols`). An entry is `true` when the passage
//! it guards is open.

use serde::{Deserialize, Serialize};

/// Row-major matrix of open/closed wall flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallGrid {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
}

impl WallGrid {
    /// Create a matrix with every wall closed
    pub fn closed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            open: vec![false; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the wall at `(row, col)` is open (out-of-range entries read as closed)
    #[inline]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.open[row * self.cols + col]
    }

    /// Open the wall at `(row, col)`
    pub(crate) fn open(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.rows && col < self.cols);
        self.open[row * self.cols + col] = true;
    }

    /// Number of open entries
    pub fn count_open(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// One row of flags
    pub fn row(&self, row: usize) -> &[bool] {
        &self.open[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate `(row, col, open)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.open
            .iter()
            .enumerate()
            .map(move |(i, &open)| (i / self.cols, i % self.cols, open))
    }
}
