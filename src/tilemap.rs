/// A bounded 2D grid stored row-major in a single flat vector.
///
/// Cells are addressed by `(row, col)`; the flat index of a cell is
/// `row * cols + col`. Unlike a map projection nothing wraps: neighbors
/// past an edge simply do not exist.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub rows: usize,
    pub cols: usize,
    data: Vec<T>,
}

/// Orthogonal offsets (d_row, d_col): N, S, W, E
pub const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All 8 offsets (d_row, d_col), clockwise from NW
pub const ALL_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // S
    (1, -1),  // SW
    (0, -1),  // W
];

impl<T: Clone> Tilemap<T> {
    pub fn new_with(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Tilemap<T> {
    /// Build from row-major data. Returns None if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Flat index of `(row, col)`.
    ///
    /// Panics if the cell is outside the grid; a column past the edge would
    /// otherwise alias a cell on the next row.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.contains(row, col),
            "({row}, {col}) outside {}x{} tilemap",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[self.index(row, col)]
    }

    pub fn try_get(&self, row: usize, col: usize) -> Option<&T> {
        if self.contains(row, col) {
            Some(self.get(row, col))
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// In-bounds cells at the given offsets from `(row, col)`.
    pub fn offset_neighbors<'a>(
        &self,
        row: usize,
        col: usize,
        offsets: &'a [(isize, isize)],
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let (rows, cols) = (self.rows, self.cols);
        offsets.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < rows && c < cols).then_some((r, c))
        })
    }

    /// Get neighbors with 4-connectivity (N, S, W, E), clipped at the edges.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        self.offset_neighbors(row, col, &ORTHOGONAL_OFFSETS)
    }

    /// Get 8-connected neighbors (including diagonals), clipped at the edges.
    pub fn neighbors_8(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        self.offset_neighbors(row, col, &ALL_OFFSETS)
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, val)| (idx / cols, idx % cols, val))
    }
}
