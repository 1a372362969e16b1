//! Plain-text grid format: one line per row, `1` for a live cell and `0` for a dead one.
//!
//! Blank lines are skipped when reading. Writing emits exactly one
//! newline-terminated line per row and nothing else.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::{Error, FormatErrorKind, Result};
use crate::grid::{CellState, Grid};

const ALIVE: char = '1';
const DEAD: char = '0';

/// Parse a grid from its textual form.
pub fn parse(text: &str) -> Result<Grid> {
    let mut cols = None;
    let mut rows = 0;
    let mut cells = Vec::new();
    let mut last_line = 0;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        last_line = line_number;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let start = cells.len();
        for (column, ch) in line.chars().enumerate() {
            let cell = match ch {
                ALIVE => CellState::Alive,
                DEAD => CellState::Dead,
                found => {
                    return Err(Error::Format {
                        line: line_number,
                        reason: FormatErrorKind::InvalidCell {
                            column: column + 1,
                            found,
                        },
                    })
                }
            };
            cells.push(cell);
        }

        let width = cells.len() - start;
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(Error::Format {
                    line: line_number,
                    reason: FormatErrorKind::Ragged {
                        expected,
                        found: width,
                    },
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    match cols {
        Some(cols) => Ok(Grid::from_cells(rows, cols, cells)),
        None => Err(Error::Format {
            line: last_line,
            reason: FormatErrorKind::Empty,
        }),
    }
}

/// Write `grid` in the textual form.
pub fn write<W: Write>(grid: &Grid, mut writer: W) -> io::Result<()> {
    let mut line = String::with_capacity(grid.cols() + 1);
    for row in grid.iter_rows() {
        line.clear();
        line.extend(row.iter().map(|cell| cell_char(*cell)));
        line.push('\n');
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

fn cell_char(cell: CellState) -> char {
    match cell {
        CellState::Alive => ALIVE,
        CellState::Dead => DEAD,
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                write!(f, "{}", cell_char(*cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
