//! Profiling tool for the flood engine and island counting

use std::time::Instant;

use rising_tides::synthetic::{generate_terrain, SyntheticParams};
use rising_tides::RisingTides;

fn main() {
    env_logger::init();
    let seed = 1337u64;
    let sizes = [(64, 64), (256, 256), (512, 1024)];

    println!("=== Flood Profiling ===");
    println!();

    for (rows, cols) in sizes {
        let params = SyntheticParams {
            rows,
            cols,
            source_count: 8,
            ..Default::default()
        };

        let start = Instant::now();
        let terrain = match generate_terrain(&params, seed) {
            Ok(terrain) => terrain,
            Err(e) => {
                eprintln!("Error generating {rows}x{cols} terrain: {e}");
                continue;
            }
        };
        let gen_time = start.elapsed();

        let tides = RisingTides::from_terrain(terrain);
        let (min_h, max_h) = tides.elevation_extrema();
        let mid = (min_h + max_h) / 2.0;

        let start = Instant::now();
        let mask = tides.flooded_regions(mid);
        let flood_time = start.elapsed();

        let start = Instant::now();
        let islands = tides.number_of_islands(mid);
        let island_time = start.elapsed();

        let levels = rising_tides::water_levels(min_h, max_h, 16);
        let start = Instant::now();
        let _sweep = tides.sweep(&levels);
        let sweep_time = start.elapsed();

        println!("Map size: {}x{} ({} cells)", rows, cols, rows * cols);
        println!("  Terrain generation: {:?}", gen_time);
        println!("  Flood at {:.1}:       {:?} ({} submerged)", mid, flood_time, mask.submerged_count());
        println!("  Island count:       {:?} ({} islands)", island_time, islands);
        println!("  Sweep of {} levels: {:?}", levels.len(), sweep_time);
        println!();
    }
}
