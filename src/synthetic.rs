//! Seeded synthetic terrain for demos, profiling and benchmarks.
//!
//! Elevations come from multi-octave Perlin noise shaped by a radial
//! falloff, so the middle of the map rises out of low edges. Water sources
//! are scattered along the map border with a ChaCha RNG.

use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::TidesResult;
use crate::terrain::{Cell, Terrain};
use crate::tilemap::Tilemap;

/// Parameters for synthetic terrain generation
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticParams {
    pub rows: usize,
    pub cols: usize,
    /// Base frequency for noise (lower = larger features)
    pub base_frequency: f64,
    /// Number of noise octaves
    pub octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Elevation of the highest possible point (lowest is 0)
    pub relief: f64,
    /// How strongly elevations sink toward the border (0.0 = flat falloff)
    pub edge_falloff: f64,
    /// Number of water sources placed on the border
    pub source_count: usize,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            rows: 48,
            cols: 64,
            base_frequency: 0.08,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            relief: 100.0,
            edge_falloff: 0.6,
            source_count: 3,
        }
    }
}

/// Generate a terrain. Equal params and seed give an equal terrain.
///
/// Fails only if `rows` or `cols` is zero.
pub fn generate_terrain(params: &SyntheticParams, seed: u64) -> TidesResult<Terrain> {
    let heights = generate_heights(params, seed);
    let sources = if heights.is_empty() {
        Vec::new()
    } else {
        border_sources(params.rows, params.cols, params.source_count, seed)
    };
    Terrain::from_tilemap(heights, sources)
}

fn generate_heights(params: &SyntheticParams, seed: u64) -> Tilemap<f64> {
    let (rows, cols) = (params.rows, params.cols);
    let noise = Perlin::new(seed as u32);
    let mut heights = Tilemap::new_with(rows, cols, 0.0f64);

    for row in 0..rows {
        for col in 0..cols {
            let x = col as f64 * params.base_frequency;
            let y = row as f64 * params.base_frequency;
            // fbm lands roughly in [-1, 1]
            let n = fbm_noise(&noise, x, y, params.octaves, params.persistence, params.lacunarity);
            let base = (n * 0.5 + 0.5).clamp(0.0, 1.0);

            let falloff = 1.0 - params.edge_falloff * edge_distance(row, col, rows, cols);
            heights.set(row, col, base * falloff.max(0.0) * params.relief);
        }
    }

    heights
}

/// 0 at the center of the map, 1 at the corners.
fn edge_distance(row: usize, col: usize, rows: usize, cols: usize) -> f64 {
    let half_r = (rows.max(2) - 1) as f64 / 2.0;
    let half_c = (cols.max(2) - 1) as f64 / 2.0;
    let dr = (row as f64 - half_r) / half_r;
    let dc = (col as f64 - half_c) / half_c;
    ((dr * dr + dc * dc) / 2.0).sqrt().min(1.0)
}

/// Pick `count` cells along the border of a `rows x cols` map.
fn border_sources(rows: usize, cols: usize, count: usize, seed: u64) -> Vec<Cell> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(0x71DE));
    (0..count)
        .map(|_| match rng.gen_range(0..4u8) {
            0 => Cell::new(0, rng.gen_range(0..cols)),
            1 => Cell::new(rows - 1, rng.gen_range(0..cols)),
            2 => Cell::new(rng.gen_range(0..rows), 0),
            _ => Cell::new(rng.gen_range(0..rows), cols - 1),
        })
        .collect()
}

/// Fractional Brownian Motion noise
fn fbm_noise(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}
