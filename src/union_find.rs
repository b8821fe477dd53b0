//! Disjoint-set forest over grid cells.
//!
//! Cells are flattened to `row * cols + col`, so the forest is two plain
//! vectors. Union by size, find with path halving.

use crate::error::{TidesError, TidesResult};
use crate::terrain::Cell;

#[derive(Clone, Debug)]
pub struct DisjointSet {
    rows: usize,
    cols: usize,
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// Every cell of a `rows x cols` grid starts as its own singleton set.
    pub fn new(rows: usize, cols: usize) -> Self {
        let n = rows * cols;
        Self {
            rows,
            cols,
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn flatten(&self, cell: Cell) -> TidesResult<usize> {
        if cell.row < self.rows && cell.col < self.cols {
            Ok(cell.row * self.cols + cell.col)
        } else {
            Err(TidesError::CellOutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn unflatten(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    /// Root index of the set containing `index`.
    pub fn find_index(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            let grandparent = self.parent[self.parent[index]];
            self.parent[index] = grandparent;
            index = grandparent;
        }
        index
    }

    /// Merge the sets containing `a` and `b`. Returns false if they were
    /// already joined.
    pub fn union_indices(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find_index(a);
        let mut root_b = self.find_index(b);
        if root_a == root_b {
            return false;
        }
        // Smaller tree hangs under the larger
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }

    /// Canonical representative of the set containing `cell`.
    pub fn find(&mut self, cell: Cell) -> TidesResult<Cell> {
        let root = self.find_index(self.flatten(cell)?);
        Ok(self.unflatten(root))
    }

    pub fn union(&mut self, a: Cell, b: Cell) -> TidesResult<bool> {
        let (a, b) = (self.flatten(a)?, self.flatten(b)?);
        Ok(self.union_indices(a, b))
    }

    pub fn connected(&mut self, a: Cell, b: Cell) -> TidesResult<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Number of cells in the set containing `cell`.
    pub fn set_size(&mut self, cell: Cell) -> TidesResult<usize> {
        let root = self.find_index(self.flatten(cell)?);
        Ok(self.size[root])
    }
}
