//! Error types for terrain construction and cell queries.

use thiserror::Error;

use crate::terrain::Cell;

/// Result alias used throughout the crate.
pub type TidesResult<T> = Result<T, TidesError>;

/// Broad class of a [`TidesError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed grid or source list. Raised once at construction.
    Configuration,
    /// A query named a cell outside the grid.
    Index,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TidesError {
    /// No rows, or rows with no columns
    #[error("terrain grid is empty")]
    EmptyGrid,

    #[error("ragged terrain grid: row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("water source {cell} lies outside the {rows}x{cols} grid")]
    SourceOutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("cell {cell} lies outside the {rows}x{cols} grid")]
    CellOutOfBounds { cell: Cell, rows: usize, cols: usize },
}

impl TidesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyGrid | Self::RaggedRow { .. } | Self::SourceOutOfBounds { .. } => {
                ErrorKind::Configuration
            }
            Self::CellOutOfBounds { .. } => ErrorKind::Index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TidesError::EmptyGrid.kind(), ErrorKind::Configuration);
        let ragged = TidesError::RaggedRow { row: 2, expected: 3, found: 1 };
        assert_eq!(ragged.kind(), ErrorKind::Configuration);

        let oob = TidesError::CellOutOfBounds {
            cell: Cell::new(5, 0),
            rows: 3,
            cols: 3,
        };
        assert_eq!(oob.kind(), ErrorKind::Index);
    }

    #[test]
    fn test_error_messages() {
        let err = TidesError::SourceOutOfBounds {
            cell: Cell::new(4, 1),
            rows: 3,
            cols: 2,
        };
        assert_eq!(err.to_string(), "water source (4, 1) lies outside the 3x2 grid");
    }
}
