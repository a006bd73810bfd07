//! Perfect-maze generation
//!
//! A maze is a grid of cells plus two wall matrices. After generation the
//! open passages form a spanning tree of the grid: exactly one path between
//! any two cells, `rows * cols - 1` passages in total.

mod generator;
pub mod grid;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{ROWS_PER_COL_DEN, ROWS_PER_COL_NUM};
use crate::error::{MazeError, Result};

pub use grid::WallGrid;

/// Source of uniform random indices
///
/// Every `rand::Rng` qualifies; tests plug in scripted sources to pin the
/// shape of a maze.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`; `bound` is always at least 1
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Grid direction, also used for ball movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate order before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Neighbouring cell in this direction, if it is inside the grid
    pub fn step(self, (row, col): (usize, usize), dims: Dimensions) -> Option<(usize, usize)> {
        let next = match self {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Right => (row, col + 1),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
        };
        dims.contains(next).then_some(next)
    }
}

/// Validated grid size (both sides at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: rows as i64,
                cols: cols as i64,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Derive dimensions from the grid-size setting: `cols = size`,
    /// `rows = floor(size * 3/5)` but never less than one row
    pub fn from_grid_size(size: u32) -> Result<Self> {
        let cols = size as usize;
        let rows = if cols == 0 {
            0
        } else {
            (cols * ROWS_PER_COL_NUM as usize / ROWS_PER_COL_DEN as usize).max(1)
        };
        Self::new(rows, cols)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn contains(&self, (row, col): (usize, usize)) -> bool {
        row < self.rows && col < self.cols
    }
}

impl TryFrom<(i64, i64)> for Dimensions {
    type Error = MazeError;

    fn try_from((rows, cols): (i64, i64)) -> Result<Self> {
        match (usize::try_from(rows), usize::try_from(cols)) {
            (Ok(r), Ok(c)) if r > 0 && c > 0 => Ok(Self { rows: r, cols: c }),
            _ => Err(MazeError::InvalidDimensions { rows, cols }),
        }
    }
}

/// A generated perfect maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    dims: Dimensions,
    /// Cell the backtracker started from
    start: (usize, usize),
    /// `rows × (cols-1)`: open between `(r,c)` and `(r,c+1)`
    verticals: WallGrid,
    /// `(rows-1) × cols`: open between `(r,c)` and `(r+1,c)`
    horizontals: WallGrid,
}

impl Maze {
    /// Generate a maze using the recursive backtracker
    ///
    /// # Arguments
    /// * `rows` - Number of cell rows (at least 1)
    /// * `cols` - Number of cell columns (at least 1)
    /// * `rng` - Randomness source; same draws always yield the same maze
    pub fn generate<R: RandomSource + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let dims = Dimensions::new(rows, cols)?;
        Ok(Self::generate_with(dims, rng))
    }

    /// Generate a maze over already-validated dimensions
    pub fn generate_with<R: RandomSource + ?Sized>(dims: Dimensions, rng: &mut R) -> Self {
        let generation = generator::backtrack(dims, rng);
        log::debug!(
            "Generated {}x{} maze from start cell {:?}",
            dims.rows(),
            dims.cols(),
            generation.start
        );
        Self {
            dims,
            start: generation.start,
            verticals: generation.verticals,
            horizontals: generation.horizontals,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols()
    }

    /// Cell the generator started carving from
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn verticals(&self) -> &WallGrid {
        &self.verticals
    }

    pub fn horizontals(&self) -> &WallGrid {
        &self.horizontals
    }

    /// Total number of open passages
    pub fn passage_count(&self) -> usize {
        self.verticals.count_open() + self.horizontals.count_open()
    }

    /// Whether a ball in `cell` can move one step in `direction`
    pub fn is_open(&self, (row, col): (usize, usize), direction: Direction) -> bool {
        if direction.step((row, col), self.dims).is_none() {
            return false;
        }
        match direction {
            Direction::Up => self.horizontals.is_open(row - 1, col),
            Direction::Right => self.verticals.is_open(row, col),
            Direction::Down => self.horizontals.is_open(row, col),
            Direction::Left => self.verticals.is_open(row, col - 1),
        }
    }

    /// Cells reachable from `cell` through one open passage
    pub fn open_neighbours(&self, cell: (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_open(cell, d))
            .filter_map(move |d| d.step(cell, self.dims))
    }
}

/// ASCII rendering: `o` marks the ball's start corner, `*` the goal
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = (self.rows(), self.cols());
        writeln!(f, "+{}", "---+".repeat(cols))?;
        for r in 0..rows {
            write!(f, "|")?;
            for c in 0..cols {
                let body = if (r, c) == (0, 0) {
                    " o "
                } else if (r, c) == (rows - 1, cols - 1) {
                    " * "
                } else {
                    "   "
                };
                let side = if self.is_open((r, c), Direction::Right) { " " } else { "|" };
                write!(f, "{body}{side}")?;
            }
            writeln!(f)?;
            write!(f, "+")?;
            for c in 0..cols {
                let floor = if self.is_open((r, c), Direction::Down) { "   " } else { "---" };
                write!(f, "{floor}+")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::VecDeque;

    /// Breadth-first count of cells reachable from (0, 0)
    fn reachable(maze: &Maze) -> usize {
        let dims = maze.dimensions();
        let mut seen = vec![false; dims.cell_count()];
        let mut queue = VecDeque::from([(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for (r, c) in maze.open_neighbours(cell) {
                let idx = r * dims.cols() + c;
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back((r, c));
                }
            }
        }
        count
    }

    #[test]
    fn test_maze_generation() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let maze = Maze::generate(7, 10, &mut rng).unwrap();
        assert_eq!(maze.verticals().rows(), 7);
        assert_eq!(maze.verticals().cols(), 9);
        assert_eq!(maze.horizontals().rows(), 6);
        assert_eq!(maze.horizontals().cols(), 10);
        assert_eq!(maze.passage_count(), 69);
        assert_eq!(reachable(&maze), 70);
    }

    #[test]
    fn test_single_cell() {
        let mut rng = Pcg32::seed_from_u64(1);
        let maze = Maze::generate(1, 1, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 0);
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.to_string(), "+---+\n| o |\n+---+\n");
    }

    #[test]
    fn test_corridors() {
        let mut rng = Pcg32::seed_from_u64(3);
        let row = Maze::generate(1, 6, &mut rng).unwrap();
        assert_eq!(row.verticals().count_open(), 5);
        assert_eq!(row.horizontals().rows(), 0);

        let column = Maze::generate(6, 1, &mut rng).unwrap();
        assert_eq!(column.horizontals().count_open(), 5);
        assert_eq!(column.verticals().cols(), 0);
    }

    #[test]
    fn test_determinism() {
        let maze1 = Maze::generate(12, 20, &mut Pcg32::seed_from_u64(99999)).unwrap();
        let maze2 = Maze::generate(12, 20, &mut Pcg32::seed_from_u64(99999)).unwrap();
        assert_eq!(maze1, maze2);
    }

    #[test]
    fn test_different_seeds() {
        let maze1 = Maze::generate(12, 20, &mut Pcg32::seed_from_u64(11111)).unwrap();
        let maze2 = Maze::generate(12, 20, &mut Pcg32::seed_from_u64(22222)).unwrap();
        assert_ne!(maze1, maze2);
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            Maze::generate(0, 5, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            Maze::generate(5, 0, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn test_negative_dimensions() {
        assert_eq!(
            Dimensions::try_from((-3i64, 4i64)),
            Err(MazeError::InvalidDimensions { rows: -3, cols: 4 })
        );
        assert_eq!(
            Dimensions::try_from((4i64, -1i64)),
            Err(MazeError::InvalidDimensions { rows: 4, cols: -1 })
        );
        assert_eq!(Dimensions::try_from((4i64, 0i64)).map(|d| d.cols()).ok(), None);
        assert_eq!(Dimensions::try_from((2i64, 3i64)), Dimensions::new(2, 3));
    }

    #[test]
    fn test_from_grid_size() {
        let dims = Dimensions::from_grid_size(10).unwrap();
        assert_eq!((dims.rows(), dims.cols()), (6, 10));
        let dims = Dimensions::from_grid_size(5).unwrap();
        assert_eq!((dims.rows(), dims.cols()), (3, 5));
        let dims = Dimensions::from_grid_size(1).unwrap();
        assert_eq!((dims.rows(), dims.cols()), (1, 1));
        assert!(Dimensions::from_grid_size(0).is_err());
    }

    #[test]
    fn test_is_open_edges() {
        let maze = Maze::generate(3, 3, &mut Pcg32::seed_from_u64(5)).unwrap();
        // Nothing leads off the grid
        assert!(!maze.is_open((0, 0), Direction::Up));
        assert!(!maze.is_open((0, 0), Direction::Left));
        assert!(!maze.is_open((2, 2), Direction::Down));
        assert!(!maze.is_open((2, 2), Direction::Right));
        // Passages are symmetric
        for r in 0..3 {
            for c in 0..3 {
                for n in maze.open_neighbours((r, c)) {
                    assert!(maze.open_neighbours(n).any(|back| back == (r, c)));
                }
            }
        }
    }

    #[test]
    fn test_display_shape() {
        let maze = Maze::generate(4, 5, &mut Pcg32::seed_from_u64(8)).unwrap();
        let art = maze.to_string();
        let lines: Vec<_> = art.lines().collect();
        assert_eq!(lines.len(), 2 * 4 + 1);
        assert!(lines.iter().all(|l| l.len() == 4 * 5 + 1));
        assert!(art.contains(" o "));
        assert!(art.contains(" * "));
    }

    proptest! {
        #[test]
        fn prop_spanning_tree(rows in 1usize..24, cols in 1usize..24, seed in any::<u64>()) {
            let maze = Maze::generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            // n - 1 edges and fully connected means no cycles
            prop_assert_eq!(maze.passage_count(), rows * cols - 1);
            prop_assert_eq!(reachable(&maze), rows * cols);
        }
    }
}
