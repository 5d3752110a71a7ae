use super::CellState;
use crate::error::{EngineError, Result};
use rand::Rng;

/// Grid manages the bounded 2D cellular automaton grid.
/// Cells are stored row-major; every public accessor is bounds-checked
/// and the dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

/// Row/column offsets of the 8 Moore neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidConfig("grid dimensions must be non-zero"));
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidConfig("grid dimensions overflow the cell count"))?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
        })
    }

    /// Get grid dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize> {
        if self.contains(row, col) {
            Ok(self.get_index(row, col))
        } else {
            Err(EngineError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Get cell at position
    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        self.check(row, col).map(|idx| self.cells[idx])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool> {
        self.get(row, col).map(CellState::is_alive)
    }

    /// Set cell at position (used for painting)
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let idx = self.check(row, col)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState> {
        let idx = self.check(row, col)?;
        let next = self.cells[idx].toggled();
        self.cells[idx] = next;
        Ok(next)
    }

    /// Count live neighbors within the grid bounds. Coordinates past an
    /// edge do not exist: a corner has 3 neighbors, an edge cell 5.
    pub fn live_neighbor_count(&self, row: usize, col: usize) -> Result<u8> {
        self.check(row, col)?;
        Ok(self.count_live_neighbors(row, col))
    }

    /// Unchecked variant for the transition scan; callers iterate in bounds.
    pub(crate) fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.contains(r, c).then(|| self.cells[self.get_index(r, c)])
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Flip every listed cell. Coordinates come from a scan of this grid,
    /// so they are always in bounds.
    pub(crate) fn flip_all(&mut self, coords: &[(usize, usize)]) {
        for &(row, col) in coords {
            let idx = self.get_index(row, col);
            self.cells[idx] = self.cells[idx].toggled();
        }
    }

    /// One row of cells
    pub(crate) fn row(&self, row: usize) -> &[CellState] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = CellState::Dead);
    }

    /// Randomize grid, each cell alive with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = CellState::from(rng.random_bool(density)));
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells as (row, col, state)
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.width, idx % self.width, cell))
    }
}
