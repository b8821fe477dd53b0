//! Water-level queries over a fixed terrain.
//!
//! Every query floods the terrain afresh for its own height; nothing is
//! cached between calls, so a [`RisingTides`] can be shared across threads.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::TidesResult;
use crate::flood::{flooded_regions, SubmersionMask};
use crate::terrain::{Cell, Terrain};
use crate::union_find::DisjointSet;

/// Statistics for one 8-connected land mass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub cell_count: usize,
    pub min_elevation: f64,
    pub max_elevation: f64,
    /// First cell (row-major) holding `max_elevation`
    pub peak: Cell,
    /// Bounding box (min_row, min_col, max_row, max_col)
    pub bounds: (usize, usize, usize, usize),
}

impl Island {
    fn new(cell: Cell, elevation: f64) -> Self {
        Self {
            cell_count: 1,
            min_elevation: elevation,
            max_elevation: elevation,
            peak: cell,
            bounds: (cell.row, cell.col, cell.row, cell.col),
        }
    }

    fn add_cell(&mut self, cell: Cell, elevation: f64) {
        self.cell_count += 1;
        // f64::min skips NaN; the peak test must too, or a NaN first cell
        // would pin the maximum forever
        self.min_elevation = self.min_elevation.min(elevation);
        if !elevation.is_nan() && (elevation > self.max_elevation || self.max_elevation.is_nan()) {
            self.max_elevation = elevation;
            self.peak = cell;
        }

        self.bounds.0 = self.bounds.0.min(cell.row);
        self.bounds.1 = self.bounds.1.min(cell.col);
        self.bounds.2 = self.bounds.2.max(cell.row);
        self.bounds.3 = self.bounds.3.max(cell.col);
    }

    /// Rows spanned by the bounding box
    pub fn height(&self) -> usize {
        self.bounds.2 - self.bounds.0 + 1
    }

    /// Columns spanned by the bounding box
    pub fn width(&self) -> usize {
        self.bounds.3 - self.bounds.1 + 1
    }
}

/// Outcome of a single water height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub height: f64,
    pub submerged: usize,
    pub visible_land: usize,
    pub islands: usize,
}

/// Query interface over an immutable terrain.
#[derive(Clone, Debug)]
pub struct RisingTides {
    terrain: Terrain,
}

impl RisingTides {
    /// Validate and wrap a height matrix and its water sources.
    pub fn new(heights: Vec<Vec<f64>>, sources: Vec<Cell>) -> TidesResult<Self> {
        Ok(Self::from_terrain(Terrain::new(heights, sources)?))
    }

    pub fn from_terrain(terrain: Terrain) -> Self {
        Self { terrain }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Lowest and highest elevation in the grid.
    pub fn elevation_extrema(&self) -> (f64, f64) {
        self.terrain.heights().as_slice().iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), &h| (min.min(h), max.max(h)),
        )
    }

    pub fn flooded_regions(&self, height: f64) -> SubmersionMask {
        flooded_regions(&self.terrain, height)
    }

    pub fn is_flooded(&self, height: f64, cell: Cell) -> TidesResult<bool> {
        // Reject before paying for the flood
        self.terrain.check_bounds(cell)?;
        self.flooded_regions(height).is_submerged(cell)
    }

    /// Elevation minus water height. Purely local: reachability is ignored,
    /// so a dry basin below the water line reports a negative value.
    pub fn height_above_water(&self, height: f64, cell: Cell) -> TidesResult<f64> {
        Ok(self.terrain.elevation(cell)? - height)
    }

    pub fn total_visible_land(&self, height: f64) -> usize {
        self.flooded_regions(height).land_count()
    }

    /// Visible land at `height` minus visible land at `new_height`.
    ///
    /// Negative when `new_height` is the lower of the two.
    pub fn land_lost(&self, height: f64, new_height: f64) -> i64 {
        self.total_visible_land(height) as i64 - self.total_visible_land(new_height) as i64
    }

    pub fn number_of_islands(&self, height: f64) -> usize {
        count_islands(&self.flooded_regions(height))
    }

    /// Every island at `height`, ordered by the row-major position of its
    /// first cell.
    pub fn islands(&self, height: f64) -> Vec<Island> {
        let mask = self.flooded_regions(height);
        let mut forest = connect_land(&mask);
        let heights = self.terrain.heights();

        let mut slot_of_root: Vec<Option<usize>> = vec![None; forest.len()];
        let mut islands: Vec<Island> = Vec::new();
        for cell in mask.land_cells() {
            let elevation = *heights.get(cell.row, cell.col);
            let root = forest.find_index(heights.index(cell.row, cell.col));
            match slot_of_root[root] {
                Some(slot) => islands[slot].add_cell(cell, elevation),
                None => {
                    slot_of_root[root] = Some(islands.len());
                    islands.push(Island::new(cell, elevation));
                }
            }
        }
        islands
    }

    pub fn summarize(&self, height: f64) -> LevelSummary {
        let mask = self.flooded_regions(height);
        LevelSummary {
            height,
            submerged: mask.submerged_count(),
            visible_land: mask.land_count(),
            islands: count_islands(&mask),
        }
    }

    /// Summaries for each height, in the order given. Levels are
    /// independent, so they are evaluated in parallel.
    pub fn sweep(&self, heights: &[f64]) -> Vec<LevelSummary> {
        log::debug!("sweeping {} water level(s)", heights.len());
        heights.par_iter().map(|&h| self.summarize(h)).collect()
    }
}

/// Union every dry cell with its dry 8-neighbors.
fn connect_land(mask: &SubmersionMask) -> DisjointSet {
    let land = mask.tilemap();
    let mut forest = DisjointSet::new(land.rows, land.cols);

    for (row, col, &wet) in land.iter() {
        if wet {
            continue;
        }
        let here = land.index(row, col);
        for (nr, nc) in land.neighbors_8(row, col) {
            if !*land.get(nr, nc) {
                forest.union_indices(here, land.index(nr, nc));
            }
        }
    }

    forest
}

/// Distinct forest roots among dry cells.
fn count_islands(mask: &SubmersionMask) -> usize {
    let mut forest = connect_land(mask);
    let land = mask.tilemap();

    let mut seen = vec![false; forest.len()];
    let mut count = 0;
    for cell in mask.land_cells() {
        let root = forest.find_index(land.index(cell.row, cell.col));
        if !seen[root] {
            seen[root] = true;
            count += 1;
        }
    }
    count
}

/// `count` evenly spaced water heights from `min` to `max` inclusive.
pub fn water_levels(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}
