//! Error types for the engine.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A serialized grid could not be parsed. `line` is 1-based.
    #[error("malformed grid at line {line}: {reason}")]
    Format { line: usize, reason: FormatErrorKind },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },
}

/// What exactly is wrong with a serialized grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// No non-blank lines at all.
    Empty,
    /// A row whose length differs from the first row.
    Ragged { expected: usize, found: usize },
    /// Anything other than `'0'` or `'1'`. `column` is 1-based.
    InvalidCell { column: usize, found: char },
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatErrorKind::Empty => write!(f, "grid has no rows"),
            FormatErrorKind::Ragged { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            FormatErrorKind::InvalidCell { column, found } => {
                write!(f, "unexpected {found:?} in column {column}")
            }
        }
    }
}

impl Error {
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }
}
