//! Grid: a rectangular board of small color values.

use serde::Deserialize;

/// Why a nested array was rejected as a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no rows")]
    NoRows,

    #[error("grid has an empty first row")]
    EmptyRow,

    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A rectangular 2-D grid of color values.
///
/// Always has at least one row and one column, and every row has the same
/// length. Deserializing from JSON enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: Vec<Vec<u8>>,
}

impl Grid {
    /// Validates and wraps a row-major array of cells.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let expected = rows.first().ok_or(GridError::NoRows)?.len();
        if expected == 0 {
            return Err(GridError::EmptyRow);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(GridError::Ragged {
                row,
                len: r.len(),
                expected,
            });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows[0].len()
    }

    /// The color at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}
