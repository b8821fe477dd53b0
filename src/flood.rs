//! Flood propagation from water sources.
//!
//! Algorithm:
//! 1. Mark every source submerged and enqueue it, whatever its elevation
//! 2. Pop cells in FIFO order and look at their 4 orthogonal neighbors
//! 3. A neighbor floods if it is unvisited and its elevation is <= the water height
//!
//! Each call allocates its own mask and queue; nothing is cached.

use std::collections::VecDeque;

use crate::error::{TidesError, TidesResult};
use crate::terrain::{Cell, Terrain};
use crate::tilemap::Tilemap;

/// Per-height flood result: `true` marks a submerged cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmersionMask {
    height: f64,
    flooded: Tilemap<bool>,
    submerged: usize,
}

impl SubmersionMask {
    /// Water height this mask was computed for.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rows(&self) -> usize {
        self.flooded.rows
    }

    pub fn cols(&self) -> usize {
        self.flooded.cols
    }

    /// None if `cell` is outside the grid.
    pub fn get(&self, cell: Cell) -> Option<bool> {
        self.flooded.try_get(cell.row, cell.col).copied()
    }

    /// Whether `cell` is under water. Cells outside the grid are an index error.
    pub fn is_submerged(&self, cell: Cell) -> TidesResult<bool> {
        self.get(cell).ok_or(TidesError::CellOutOfBounds {
            cell,
            rows: self.rows(),
            cols: self.cols(),
        })
    }

    pub fn submerged_count(&self) -> usize {
        self.submerged
    }

    /// Number of cells still above water.
    pub fn land_count(&self) -> usize {
        self.flooded.len() - self.submerged
    }

    /// Iterate over non-submerged cells in row-major order.
    pub fn land_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.flooded
            .iter()
            .filter(|&(_, _, &wet)| !wet)
            .map(|(row, col, _)| Cell::new(row, col))
    }

    /// Underlying boolean grid.
    pub fn tilemap(&self) -> &Tilemap<bool> {
        &self.flooded
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.flooded
            .as_slice()
            .chunks(self.flooded.cols)
            .map(<[bool]>::to_vec)
            .collect()
    }
}

/// Flood the terrain to `height` from all of its sources at once.
///
/// The comparison is inclusive: a neighbor at exactly `height` floods.
pub fn flooded_regions(terrain: &Terrain, height: f64) -> SubmersionMask {
    let heights = terrain.heights();
    let mut flooded = Tilemap::new_with(heights.rows, heights.cols, false);
    let mut queue = VecDeque::with_capacity(terrain.sources().len());
    let mut submerged = 0usize;

    for &source in terrain.sources() {
        if !*flooded.get(source.row, source.col) {
            flooded.set(source.row, source.col, true);
            submerged += 1;
            queue.push_back(source);
        }
    }

    while let Some(cell) = queue.pop_front() {
        for (nr, nc) in heights.neighbors(cell.row, cell.col) {
            if !*flooded.get(nr, nc) && *heights.get(nr, nc) <= height {
                flooded.set(nr, nc, true);
                submerged += 1;
                queue.push_back(Cell::new(nr, nc));
            }
        }
    }

    log::trace!("flood at {height}: {submerged} of {} cells submerged", flooded.len());

    SubmersionMask {
        height,
        flooded,
        submerged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn staircase() -> Terrain {
        Terrain::new(
            vec![
                vec![0.0, 1.0, 2.0],
                vec![1.0, 2.0, 3.0],
                vec![2.0, 3.0, 4.0],
            ],
            vec![Cell::new(0, 0)],
        )
        .unwrap()
    }

    fn submerged_cells(mask: &SubmersionMask) -> Vec<Cell> {
        mask.tilemap()
            .iter()
            .filter(|&(_, _, &wet)| wet)
            .map(|(r, c, _)| Cell::new(r, c))
            .collect()
    }

    #[test]
    fn test_staircase_at_height_one() {
        let mask = flooded_regions(&staircase(), 1.0);
        assert_eq!(
            submerged_cells(&mask),
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]
        );
        assert_eq!(mask.submerged_count(), 3);
        assert_eq!(mask.land_count(), 6);
        assert_eq!(mask.height(), 1.0);
    }

    #[test]
    fn test_sources_always_submerged() {
        // Source sits on a peak well above the water
        let terrain = Terrain::new(
            vec![vec![0.0, 0.0, 0.0], vec![0.0, 9.0, 0.0], vec![0.0, 0.0, 0.0]],
            vec![Cell::new(1, 1)],
        )
        .unwrap();

        let mask = flooded_regions(&terrain, -5.0);
        assert!(mask.is_submerged(Cell::new(1, 1)).unwrap(), "source floods regardless of elevation");
        assert_eq!(mask.submerged_count(), 1, "nothing else is low enough");

        // Once the water reaches the surroundings they flood from the peak
        let mask = flooded_regions(&terrain, 0.0);
        assert_eq!(mask.submerged_count(), 9);
    }

    #[test]
    fn test_plateau_at_exact_height_floods() {
        let terrain = Terrain::new(
            vec![vec![1.0, 5.0, 5.0, 5.0, 7.0]],
            vec![Cell::new(0, 0)],
        )
        .unwrap();

        let mask = flooded_regions(&terrain, 5.0);
        assert_eq!(mask.to_rows(), vec![vec![true, true, true, true, false]]);

        let mask = flooded_regions(&terrain, 4.999);
        assert_eq!(mask.submerged_count(), 1);
    }

    #[test]
    fn test_flood_does_not_cross_diagonals() {
        // Low cell (1,1) is only diagonally adjacent to the source
        let terrain = Terrain::new(
            vec![vec![0.0, 9.0], vec![9.0, 0.0]],
            vec![Cell::new(0, 0)],
        )
        .unwrap();

        let mask = flooded_regions(&terrain, 1.0);
        assert!(!mask.is_submerged(Cell::new(1, 1)).unwrap());
        assert_eq!(mask.submerged_count(), 1);
    }

    #[test]
    fn test_low_basin_behind_ridge_stays_dry() {
        let terrain = Terrain::new(
            vec![vec![0.0, 10.0, -3.0, -3.0]],
            vec![Cell::new(0, 0)],
        )
        .unwrap();

        let mask = flooded_regions(&terrain, 5.0);
        assert_eq!(mask.to_rows(), vec![vec![true, false, false, false]]);
    }

    #[test]
    fn test_monotonic_in_height() {
        let terrain = staircase();
        let heights = [-1.0, 0.0, 0.5, 1.0, 2.0, 2.5, 3.0, 4.0, 10.0];
        for pair in heights.windows(2) {
            let low = flooded_regions(&terrain, pair[0]);
            let high = flooded_regions(&terrain, pair[1]);
            for (r, c, &wet) in low.tilemap().iter() {
                if wet {
                    assert!(
                        high.is_submerged(Cell::new(r, c)).unwrap(),
                        "({r}, {c}) flooded at {} but not at {}",
                        pair[0],
                        pair[1]
                    );
                }
            }
        }
    }

    #[test]
    fn test_duplicate_sources_counted_once() {
        let terrain = Terrain::new(
            vec![vec![3.0, 3.0]],
            vec![Cell::new(0, 0), Cell::new(0, 0)],
        )
        .unwrap();
        let mask = flooded_regions(&terrain, 0.0);
        assert_eq!(mask.submerged_count(), 1);
        assert_eq!(mask.land_cells().collect::<Vec<_>>(), vec![Cell::new(0, 1)]);
    }

    #[test]
    fn test_mask_get_out_of_bounds() {
        let mask = flooded_regions(&staircase(), 1.0);
        assert_eq!(mask.get(Cell::new(0, 1)), Some(true));
        assert_eq!(mask.get(Cell::new(3, 0)), None);
    }

    #[test]
    fn test_is_submerged_rejects_column_past_edge() {
        // (0, 4) on a 3x3 grid would land on (1, 1) if flattened unchecked
        let mask = flooded_regions(&staircase(), 2.0);
        assert!(mask.is_submerged(Cell::new(1, 1)).unwrap());
        let err = mask.is_submerged(Cell::new(0, 4)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
        assert_eq!(
            err,
            TidesError::CellOutOfBounds { cell: Cell::new(0, 4), rows: 3, cols: 3 }
        );
    }
}
