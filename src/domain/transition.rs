//! Generation stepping.
//!
//! A step is split in two phases: every cell is evaluated against the
//! current grid to build a [`PendingTransition`], then the whole batch of
//! flips is applied. Evaluation only ever holds a shared borrow of the grid,
//! so no cell can observe a neighbor's next-generation state.

use super::Grid;
use rayon::prelude::*;

/// Cells that must flip to reach the next generation, in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingTransition {
    flips: Vec<(usize, usize)>,
}

impl PendingTransition {
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.flips.binary_search(&(row, col)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.flips.iter().copied()
    }
}

/// How the evaluation scan is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Cell-by-cell on the calling thread
    Serial,
    /// Rows evaluated in parallel with rayon
    Parallel,
    /// Parallel once the grid has at least this many cells
    #[default]
    Auto,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Serial => "Serial",
            Strategy::Parallel => "Parallel",
            Strategy::Auto => "Auto",
        }
    }
}

/// Default cell count at which `Strategy::Auto` switches to parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256 * 256;

/// Stateless Life stepper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEngine {
    strategy: Strategy,
    parallel_threshold: usize,
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl TransitionEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, cells: usize) -> Self {
        self.parallel_threshold = cells;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn runs_parallel(&self, grid: &Grid) -> bool {
        match self.strategy {
            Strategy::Serial => false,
            Strategy::Parallel => true,
            Strategy::Auto => grid.width() * grid.height() >= self.parallel_threshold,
        }
    }

    /// Evaluate the rule for every cell against the unmodified grid.
    pub fn evaluate(&self, grid: &Grid) -> PendingTransition {
        let flips: Vec<(usize, usize)> = if self.runs_parallel(grid) {
            (0..grid.height())
                .into_par_iter()
                .flat_map_iter(|row| Self::row_flips(grid, row))
                .collect()
        } else {
            (0..grid.height())
                .flat_map(|row| Self::row_flips(grid, row))
                .collect()
        };
        PendingTransition { flips }
    }

    fn row_flips(grid: &Grid, row: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        grid.row(row)
            .iter()
            .enumerate()
            .filter(move |&(col, cell)| cell.flips(grid.count_live_neighbors(row, col)))
            .map(move |(col, _)| (row, col))
    }

    /// Apply a batch computed from this same grid.
    pub fn apply(grid: &mut Grid, pending: &PendingTransition) {
        grid.flip_all(&pending.flips);
    }

    /// Advance the grid one generation in place and return the applied flips.
    pub fn step(&self, grid: &mut Grid) -> PendingTransition {
        let pending = self.evaluate(grid);
        Self::apply(grid, &pending);
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(r, c) in alive {
            grid.set(r, c, CellState::Alive).unwrap();
        }
        grid
    }

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        grid.iter_cells()
            .filter(|(_, _, s)| s.is_alive())
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        let engine = TransitionEngine::default();
        let mut grid = Grid::new(12, 9).unwrap();
        let pending = engine.step(&mut grid);
        assert!(pending.is_empty());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_lone_cell_dies() {
        let engine = TransitionEngine::default();
        let mut grid = grid_with(5, 5, &[(2, 2)]);
        engine.step(&mut grid);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_center_only_no_births() {
        // Every neighbor sees exactly one live cell, never three.
        let engine = TransitionEngine::new(Strategy::Serial);
        let mut grid = grid_with(3, 3, &[(1, 1)]);
        let pending = engine.evaluate(&grid);
        assert_eq!(pending.iter().collect::<Vec<_>>(), vec![(1, 1)]);
        TransitionEngine::apply(&mut grid, &pending);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let engine = TransitionEngine::default();
        let mut grid = grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]);

        engine.step(&mut grid);
        assert_eq!(alive_cells(&grid), vec![(0, 1), (1, 1), (2, 1)]);

        engine.step(&mut grid);
        assert_eq!(alive_cells(&grid), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_block_still_life() {
        let engine = TransitionEngine::default();
        let block = [(0, 0), (0, 1), (1, 0), (1, 1)];
        let mut grid = grid_with(2, 2, &block);
        for _ in 0..10 {
            assert!(engine.step(&mut grid).is_empty());
        }
        assert_eq!(alive_cells(&grid), block.to_vec());
    }

    #[test]
    fn test_pending_lists_only_flips() {
        let engine = TransitionEngine::default();
        let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let pending = engine.evaluate(&grid);
        assert_eq!(pending.len(), 4);
        assert!(pending.contains(2, 1));
        assert!(pending.contains(1, 2));
        assert!(pending.contains(3, 2));
        assert!(!pending.contains(2, 2));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(64, 48).unwrap();
        grid.randomize(0.35, &mut rng);

        let serial = TransitionEngine::new(Strategy::Serial);
        let parallel = TransitionEngine::new(Strategy::Parallel);
        let mut a = grid.clone();
        let mut b = grid;
        for _ in 0..20 {
            assert_eq!(serial.step(&mut a), parallel.step(&mut b));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_auto_threshold() {
        let grid = Grid::new(4, 4).unwrap();
        let engine = TransitionEngine::new(Strategy::Auto).with_parallel_threshold(16);
        assert!(engine.runs_parallel(&grid));
        let engine = engine.with_parallel_threshold(17);
        assert!(!engine.runs_parallel(&grid));
    }
}
