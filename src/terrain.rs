//! Terrain grid model: fixed elevations plus the cells water flows from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TidesError, TidesResult};
use crate::tilemap::Tilemap;

/// A `(row, col)` grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable elevation grid and water sources.
///
/// Validated once at construction: the grid is non-empty and rectangular,
/// and every source lies inside it. Nothing mutates it afterwards.
#[derive(Clone, Debug)]
pub struct Terrain {
    heights: Tilemap<f64>,
    sources: Vec<Cell>,
}

impl Terrain {
    /// Build a terrain from a row-major height matrix.
    pub fn new(heights: Vec<Vec<f64>>, sources: Vec<Cell>) -> TidesResult<Self> {
        let rows = heights.len();
        let cols = heights.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(TidesError::EmptyGrid);
        }

        let mut data = Vec::with_capacity(rows * cols);
        for (row, values) in heights.into_iter().enumerate() {
            if values.len() != cols {
                return Err(TidesError::RaggedRow {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }

        let heights = Tilemap::from_vec(rows, cols, data).ok_or(TidesError::EmptyGrid)?;
        Self::from_tilemap(heights, sources)
    }

    /// Build a terrain from an already rectangular tilemap.
    pub fn from_tilemap(heights: Tilemap<f64>, sources: Vec<Cell>) -> TidesResult<Self> {
        if heights.is_empty() {
            return Err(TidesError::EmptyGrid);
        }
        if let Some(&cell) = sources.iter().find(|s| !heights.contains(s.row, s.col)) {
            return Err(TidesError::SourceOutOfBounds {
                cell,
                rows: heights.rows,
                cols: heights.cols,
            });
        }

        log::debug!(
            "terrain ready: {}x{} cells, {} water source(s)",
            heights.rows,
            heights.cols,
            sources.len()
        );
        Ok(Self { heights, sources })
    }

    pub fn rows(&self) -> usize {
        self.heights.rows
    }

    pub fn cols(&self) -> usize {
        self.heights.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.heights.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.heights.contains(cell.row, cell.col)
    }

    /// Fails with an index error if `cell` is outside the grid.
    pub fn check_bounds(&self, cell: Cell) -> TidesResult<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(TidesError::CellOutOfBounds {
                cell,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    pub fn elevation(&self, cell: Cell) -> TidesResult<f64> {
        self.check_bounds(cell)?;
        Ok(*self.heights.get(cell.row, cell.col))
    }

    pub fn sources(&self) -> &[Cell] {
        &self.sources
    }

    pub fn heights(&self) -> &Tilemap<f64> {
        &self.heights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_terrain_dimensions() {
        let terrain = Terrain::new(
            vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]],
            vec![Cell::new(1, 2)],
        )
        .unwrap();
        assert_eq!(terrain.rows(), 2);
        assert_eq!(terrain.cols(), 3);
        assert_eq!(terrain.cell_count(), 6);
        assert_eq!(terrain.elevation(Cell::new(1, 0)).unwrap(), 3.0);
        assert_eq!(terrain.sources(), &[Cell::new(1, 2)]);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(Terrain::new(vec![], vec![]).unwrap_err(), TidesError::EmptyGrid);
        assert_eq!(
            Terrain::new(vec![vec![], vec![]], vec![]).unwrap_err(),
            TidesError::EmptyGrid
        );
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let err = Terrain::new(vec![vec![1.0, 2.0], vec![3.0]], vec![]).unwrap_err();
        assert_eq!(
            err,
            TidesError::RaggedRow { row: 1, expected: 2, found: 1 }
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_source_out_of_bounds_rejected() {
        let err = Terrain::new(vec![vec![1.0, 2.0]], vec![Cell::new(0, 1), Cell::new(0, 2)])
            .unwrap_err();
        assert_eq!(
            err,
            TidesError::SourceOutOfBounds { cell: Cell::new(0, 2), rows: 1, cols: 2 }
        );
    }

    #[test]
    fn test_duplicate_and_empty_sources_allowed() {
        let dup = Terrain::new(vec![vec![1.0]], vec![Cell::new(0, 0), Cell::new(0, 0)]);
        assert!(dup.is_ok());
        let none = Terrain::new(vec![vec![1.0]], vec![]);
        assert!(none.is_ok(), "a terrain without sources is valid; nothing floods");
    }

    #[test]
    fn test_elevation_out_of_bounds() {
        let terrain = Terrain::new(vec![vec![1.0, 2.0]], vec![]).unwrap();
        let err = terrain.elevation(Cell::new(1, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
    }
}
