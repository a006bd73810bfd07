//! Maze generation using the recursive backtracker
//!
//! Randomized depth-first spanning tree:
//! 1. Pick a random start cell
//! 2. Visit a cell: mark it, shuffle its four neighbours (Fisher-Yates)
//! 3. For each neighbour in order, skip it if out of bounds or visited,
//!    otherwise open the wall between them and visit it before moving on
//! 4. Backtrack when a cell runs out of neighbours
//!
//! The descent runs on an explicit stack of frames so large grids never
//! touch the native call stack. Randomness is consumed in exactly the order
//! the recursive formulation would consume it.

use super::grid::WallGrid;
use super::{Dimensions, Direction, RandomSource};

/// Result of one generation run
pub(super) struct Generation {
    pub start: (usize, usize),
    pub verticals: WallGrid,
    pub horizontals: WallGrid,
    /// Per-cell visit flags, row-major (all true on return)
    pub visited: Vec<bool>,
}

/// A suspended visit: the cell, its shuffled neighbours, and the next one to try
struct Frame {
    cell: (usize, usize),
    candidates: [Direction; 4],
    next: usize,
}

/// Shuffle the four directions into a uniformly random order
fn shuffled<R: RandomSource + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut candidates = Direction::ALL;
    for i in (1..candidates.len()).rev() {
        let j = rng.next_index(i + 1);
        candidates.swap(i, j);
    }
    candidates
}

/// Enter a cell. Returns the frame to push, or None on re-entry.
fn visit<R: RandomSource + ?Sized>(
    cell: (usize, usize),
    dims: Dimensions,
    visited: &mut [bool],
    rng: &mut R,
) -> Option<Frame> {
    let idx = cell.0 * dims.cols() + cell.1;
    if visited[idx] {
        return None;
    }
    visited[idx] = true;
    Some(Frame {
        cell,
        candidates: shuffled(rng),
        next: 0,
    })
}

/// Carve a perfect maze over `dims`
pub(super) fn backtrack<R: RandomSource + ?Sized>(dims: Dimensions, rng: &mut R) -> Generation {
    let (rows, cols) = (dims.rows(), dims.cols());
    let mut visited = vec![false; dims.cell_count()];
    let mut verticals = WallGrid::closed(rows, cols - 1);
    let mut horizontals = WallGrid::closed(rows - 1, cols);

    let start = (rng.next_index(rows), rng.next_index(cols));

    let mut stack: Vec<Frame> = Vec::with_capacity(dims.cell_count());
    stack.extend(visit(start, dims, &mut visited, rng));

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.candidates.len() {
            stack.pop();
            continue;
        }
        let direction = frame.candidates[frame.next];
        frame.next += 1;
        let (row, col) = frame.cell;

        let Some(neighbour) = direction.step((row, col), dims) else {
            continue;
        };
        if visited[neighbour.0 * cols + neighbour.1] {
            continue;
        }

        match direction {
            Direction::Up => horizontals.open(row - 1, col),
            Direction::Right => verticals.open(row, col),
            Direction::Down => horizontals.open(row, col),
            Direction::Left => verticals.open(row, col - 1),
        }

        stack.extend(visit(neighbour, dims, &mut visited, rng));
    }

    Generation {
        start,
        verticals,
        horizontals,
        visited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Replays fixed draws, then returns 0 forever
    struct Scripted {
        draws: Vec<usize>,
        pos: usize,
        calls: usize,
    }

    impl Scripted {
        fn new(draws: &[usize]) -> Self {
            Self {
                draws: draws.to_vec(),
                pos: 0,
                calls: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&mut self, bound: usize) -> usize {
            self.calls += 1;
            let value = self.draws.get(self.pos).copied().unwrap_or(0);
            self.pos += 1;
            value % bound
        }
    }

    #[test]
    fn test_shuffle_all_zero_draws() {
        let mut rng = Scripted::new(&[]);
        assert_eq!(
            shuffled(&mut rng),
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
        );
        assert_eq!(rng.calls, 3);
    }

    #[test]
    fn test_shuffle_identity_draws() {
        // j == i at every step leaves the order untouched
        let mut rng = Scripted::new(&[3, 2, 1]);
        assert_eq!(shuffled(&mut rng), Direction::ALL);
    }

    #[test]
    fn test_visits_every_cell() {
        let dims = Dimensions::new(9, 13).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let generation = backtrack(dims, &mut rng);
        assert!(generation.visited.iter().all(|&v| v));
    }

    #[test]
    fn test_one_shuffle_per_cell() {
        // Two draws for the start cell, three per visited cell
        let dims = Dimensions::new(4, 6).unwrap();
        let mut rng = Scripted::new(&[1, 5, 2, 0, 1, 1, 0, 2]);
        backtrack(dims, &mut rng);
        assert_eq!(rng.calls, 2 + 3 * 24);
    }

    #[test]
    fn test_fixture_7x10_from_3_4() {
        // Start at (3,4); every shuffle resolves to right, down, left, up
        let dims = Dimensions::new(7, 10).unwrap();
        let mut rng = Scripted::new(&[3, 4]);
        let generation = backtrack(dims, &mut rng);
        assert_eq!(generation.start, (3, 4));

        let closed_verticals = [(1, 1), (2, 2), (3, 3), (4, 8), (5, 8)];
        for (r, c, open) in generation.verticals.iter() {
            assert_eq!(
                open,
                !closed_verticals.contains(&(r, c)),
                "vertical wall ({r},{c})"
            );
        }
        assert!(!generation.verticals.is_open(3, 3));
        assert!(generation.verticals.is_open(3, 4));

        let open_horizontals = [
            (0, 1),
            (1, 0),
            (1, 2),
            (1, 9),
            (2, 3),
            (3, 0),
            (3, 9),
            (4, 8),
            (4, 9),
            (5, 0),
            (5, 9),
        ];
        for (r, c, open) in generation.horizontals.iter() {
            assert_eq!(
                open,
                open_horizontals.contains(&(r, c)),
                "horizontal wall ({r},{c})"
            );
        }

        let passages = generation.verticals.count_open() + generation.horizontals.count_open();
        assert_eq!(passages, 69);
    }

    #[test]
    fn test_large_grid_does_not_recurse() {
        let dims = Dimensions::new(300, 300).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let generation = backtrack(dims, &mut rng);
        let passages = generation.verticals.count_open() + generation.horizontals.count_open();
        assert_eq!(passages, 300 * 300 - 1);
    }
}
