//! Game of Life simulation engine.
//!
//! [`GameOfLife`] owns the grid and advances it one generation at a time;
//! front ends read [`GameOfLife::current`] between steps and decide when to
//! stop with [`GameOfLife::has_changed`] and [`GameOfLife::is_exhausted`].

pub mod config;
pub mod error;
pub mod format;
pub mod frontend;
pub mod grid;
pub mod life;

pub use config::Config;
pub use error::{Error, FormatErrorKind, Result};
pub use frontend::{Frontend, Headless};
pub use grid::{CellState, Grid};
pub use life::GameOfLife;
