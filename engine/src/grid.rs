/**
* A live cell dies if it has fewer than two live neighbors.
* A live cell with two or three live neighbors lives on to the next generation.
* A live cell with more than three live neighbors dies.
* A dead cell will be brought back to live if it has exactly three live neighbors.
*
* The grid does not wrap: cells on an edge simply have fewer neighbors.
*/
use rand::Rng;

use crate::error::{Error, Result};
use crate::grid::CellState::{Alive, Dead};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Alive => Dead,
            Dead => Alive,
        }
    }

    /// Next state of a cell given how many of its neighbors are alive.
    pub fn next(self, alive_neighbors: usize) -> Self {
        match (self, alive_neighbors) {
            (Alive, 2..=3) => Alive, // Survives
            (Dead, 3) => Alive,      // Becomes alive
            _ => Dead,               // Dies or remains dead
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Alive
        } else {
            Dead
        }
    }
}

/// Fixed-size rectangular grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Dead; rows * cols],
        }
    }

    /// A grid where every cell is independently alive with probability 1/2.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let mut grid = Grid::new(rows, cols);
        grid.randomize(rng);
        grid
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Grid { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let index = self.index(row, col)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Flip a single cell and return its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState> {
        let index = self.index(row, col)?;
        let cell = &mut self.cells[index];
        *cell = cell.toggled();
        Ok(*cell)
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.random_bool(0.5).into();
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Dead);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Rows as slices, top to bottom. Zero-width grids yield one empty slice per row.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        (0..self.rows).map(move |row| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Count the number of alive neighbors for a cell
    pub fn alive_neighbors(&self, row: usize, col: usize) -> Result<usize> {
        self.index(row, col)?;
        Ok(self.count_alive_neighbors(row, col))
    }

    fn count_alive_neighbors(&self, row: usize, col: usize) -> usize {
        let mut count = 0;

        let row_range = row.saturating_sub(1)..(row + 2).min(self.rows);
        for neighbor_row in row_range {
            let col_range = col.saturating_sub(1)..(col + 2).min(self.cols);
            for neighbor_col in col_range {
                if (neighbor_row, neighbor_col) == (row, col) {
                    // Skip the current cell
                    continue;
                }
                if self.cells[neighbor_row * self.cols + neighbor_col].is_alive() {
                    count += 1;
                }
            }
        }

        count
    }

    /// Write the generation following `self` into `next`.
    ///
    /// `next` must have the same dimensions; every one of its cells is overwritten.
    pub(crate) fn advance_into(&self, next: &mut Grid) {
        debug_assert_eq!((self.rows, self.cols), (next.rows, next.cols));

        for row in 0..self.rows {
            for col in 0..self.cols {
                let index = row * self.cols + col;
                next.cells[index] = self.cells[index].next(self.count_alive_neighbors(row, col));
            }
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols);
        for &(row, col) in alive {
            grid.set(row, col, Alive).unwrap();
        }
        grid
    }

    #[test]
    fn transition_rule() {
        for n in 0..=8 {
            let survives = Alive.next(n);
            let born = Dead.next(n);
            assert_eq!(survives, if n == 2 || n == 3 { Alive } else { Dead }, "alive with {n}");
            assert_eq!(born, if n == 3 { Alive } else { Dead }, "dead with {n}");
        }
    }

    #[test]
    fn neighbors_are_clipped_at_edges() {
        let mut grid = Grid::new(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                grid.set(row, col, Alive).unwrap();
            }
        }
        assert_eq!(grid.alive_neighbors(0, 0).unwrap(), 3);
        assert_eq!(grid.alive_neighbors(0, 1).unwrap(), 5);
        assert_eq!(grid.alive_neighbors(1, 1).unwrap(), 8);
        assert_eq!(grid.alive_neighbors(2, 2).unwrap(), 3);
    }

    #[test]
    fn no_wraparound() {
        // Opposite corners would be neighbors on a torus.
        let grid = grid_with(4, 4, &[(3, 3)]);
        assert_eq!(grid.alive_neighbors(0, 0).unwrap(), 0);
        assert_eq!(grid.alive_neighbors(2, 2).unwrap(), 1);
    }

    #[test]
    fn neighbor_count_outside_grid_is_an_error() {
        let grid = grid_with(3, 3, &[(2, 0), (2, 1), (2, 2)]);
        assert!(matches!(
            grid.alive_neighbors(3, 1),
            Err(Error::OutOfBounds { row: 3, col: 1, rows: 3, cols: 3 })
        ));
        assert!(grid.alive_neighbors(1, 3).is_err());
        assert!(grid.alive_neighbors(usize::MAX, 0).is_err());
        assert!(grid.alive_neighbors(0, usize::MAX).is_err());
        assert_eq!(grid.alive_neighbors(1, 1).unwrap(), 3);
    }

    #[test]
    fn out_of_bounds_access_is_reported() {
        let mut grid = Grid::new(2, 3);
        assert!(matches!(
            grid.get(2, 0),
            Err(Error::OutOfBounds { row: 2, col: 0, rows: 2, cols: 3 })
        ));
        assert!(grid.set(0, 3, Alive).is_err());
        assert!(grid.toggle(5, 5).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn toggle_flips_state() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.toggle(1, 0).unwrap(), Alive);
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.toggle(1, 0).unwrap(), Dead);
        assert!(grid.is_empty());
    }

    #[test]
    fn advance_into_overwrites_every_cell() {
        let grid = grid_with(3, 3, &[(0, 1), (1, 1), (2, 1)]);
        let mut next = grid_with(3, 3, &[(0, 0), (2, 2)]);
        grid.advance_into(&mut next);
        assert_eq!(next, grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]));
    }

    #[test]
    fn seeded_randomization_is_reproducible() {
        let a = Grid::random(8, 8, &mut StdRng::seed_from_u64(7));
        let b = Grid::random(8, 8, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn iter_rows_yields_row_slices() {
        let grid = grid_with(2, 3, &[(1, 2)]);
        let rows: Vec<&[CellState]> = grid.iter_rows().collect();
        assert_eq!(rows, vec![&[Dead, Dead, Dead][..], &[Dead, Dead, Alive][..]]);
        assert_eq!(Grid::new(0, 0).iter_rows().count(), 0);
    }

    #[test]
    fn zero_width_grid_still_has_rows() {
        let grid = Grid::new(3, 0);
        let rows: Vec<&[CellState]> = grid.iter_rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.is_empty()));
        assert_eq!(grid.to_string(), "\n\n\n");
    }
}
