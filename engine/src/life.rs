use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::Rng;

use crate::error::{Error, Result};
use crate::format;
use crate::grid::{CellState, Grid};

/// A Game of Life simulation.
///
/// Two equally sized buffers are kept: the current generation and the one
/// before it. Stepping writes the next generation over the older buffer and
/// swaps roles, so no grid is reallocated after construction.
#[derive(Debug, Clone)]
pub struct GameOfLife {
    buffers: [Grid; 2],
    current: usize,
    generation: u64,
    max_generations: Option<u64>,
}

impl GameOfLife {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_grid(Grid::new(rows, cols))
    }

    /// A simulation whose first generation is drawn from `rng`.
    pub fn randomized<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::from_grid(Grid::random(rows, cols, rng))
    }

    pub fn create<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        randomize: bool,
        max_generations: Option<u64>,
        rng: &mut R,
    ) -> Self {
        let life = if randomize {
            Self::randomized(rows, cols, rng)
        } else {
            Self::new(rows, cols)
        };
        log::debug!(
            "created {rows}x{cols} simulation (randomized: {randomize}, max generations: {max_generations:?})"
        );
        life.with_max_generations(max_generations)
    }

    /// Start from `grid`. The previous generation is all dead.
    pub fn from_grid(grid: Grid) -> Self {
        let previous = Grid::new(grid.rows(), grid.cols());
        GameOfLife {
            buffers: [grid, previous],
            current: 0,
            generation: 1,
            max_generations: None,
        }
    }

    /// Load the first generation from a file in the text grid format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let life: Self = text.parse()?;
        log::debug!(
            "loaded {}x{} grid from {}",
            life.rows(),
            life.cols(),
            path.display()
        );
        Ok(life)
    }

    pub fn with_max_generations(mut self, max_generations: Option<u64>) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn rows(&self) -> usize {
        self.current().rows()
    }

    pub fn cols(&self) -> usize {
        self.current().cols()
    }

    pub fn current(&self) -> &Grid {
        &self.buffers[self.current]
    }

    pub fn previous(&self) -> &Grid {
        &self.buffers[1 - self.current]
    }

    /// Number of generations produced so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn max_generations(&self) -> Option<u64> {
        self.max_generations
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        self.current().get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.current_mut().set(row, col, state)
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState> {
        self.current_mut().toggle(row, col)
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current_mut().randomize(rng);
    }

    pub fn clear(&mut self) {
        self.current_mut().clear();
    }

    pub fn step(&mut self) {
        let [first, second] = &mut self.buffers;
        let (current, next) = if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };
        current.advance_into(next);
        self.current = 1 - self.current;
        self.generation += 1;
        log::trace!("generation {}", self.generation);
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_generations.is_some_and(|max| self.generation >= max)
    }

    /// Whether the current generation differs from the previous one.
    pub fn has_changed(&self) -> bool {
        self.current() != self.previous()
    }

    /// True once the simulation has nothing left to do: it either settled or hit its limit.
    pub fn is_finished(&self) -> bool {
        !self.has_changed() || self.is_exhausted()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        format::write(self.current(), BufWriter::new(file))?;
        log::debug!("saved generation {} to {}", self.generation, path.display());
        Ok(())
    }

    /// Save into `dir` as `life_gen{generation}.txt`, creating `dir` if needed.
    pub fn save_snapshot<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("life_gen{}.txt", self.generation));
        self.save(&path)?;
        Ok(path)
    }

    fn current_mut(&mut self) -> &mut Grid {
        &mut self.buffers[self.current]
    }
}

impl FromStr for GameOfLife {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::from_grid(s.parse()?))
    }
}
