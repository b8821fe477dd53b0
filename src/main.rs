use std::process;

use clap::Parser;

use rising_tides::synthetic::{generate_terrain, SyntheticParams};
use rising_tides::{water_levels, Cell, RisingTides};

#[derive(Parser, Debug)]
#[command(name = "rising_tides")]
#[command(about = "Flood a synthetic terrain at rising water levels and count what stays dry")]
struct Args {
    /// Number of grid rows
    #[arg(short = 'r', long, default_value = "48")]
    rows: usize,

    /// Number of grid columns
    #[arg(short = 'c', long, default_value = "64")]
    cols: usize,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of water sources placed on the map border
    #[arg(long, default_value = "3")]
    sources: usize,

    /// Number of evenly spaced water levels between the lowest and highest elevation
    #[arg(short = 'l', long, default_value = "8")]
    levels: usize,

    /// Report a single water height in detail, including every island
    #[arg(long)]
    height: Option<f64>,

    /// Cell to probe at --height, as ROW,COL
    #[arg(long, value_parser = parse_cell)]
    probe: Option<Cell>,

    /// Print the level sweep as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row '{row}': {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column '{col}': {e}"))?;
    Ok(Cell::new(row, col))
}

/// `--json` prints only the sweep, so the single-height report is dropped.
fn detail_ignored_with_json(args: &Args) -> bool {
    args.json && (args.height.is_some() || args.probe.is_some())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let params = SyntheticParams {
        rows: args.rows,
        cols: args.cols,
        source_count: args.sources,
        ..Default::default()
    };

    let terrain = match generate_terrain(&params, seed) {
        Ok(terrain) => terrain,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let tides = RisingTides::from_terrain(terrain);
    let (min_h, max_h) = tides.elevation_extrema();
    let levels = water_levels(min_h, max_h, args.levels);
    let sweep = tides.sweep(&levels);

    if args.json {
        if detail_ignored_with_json(&args) {
            eprintln!("Warning: --height and --probe are ignored with --json");
        }
        match serde_json::to_string_pretty(&sweep) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing sweep: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("Terrain seed: {}", seed);
    println!("Map size: {}x{} ({} cells)", args.rows, args.cols, tides.terrain().cell_count());
    let sources: Vec<String> = tides.terrain().sources().iter().map(ToString::to_string).collect();
    println!("Water sources: {}", sources.join(" "));
    println!("Elevation range: {:.2} to {:.2}", min_h, max_h);
    println!();

    println!("{:>10} {:>10} {:>10} {:>8}", "height", "submerged", "land", "islands");
    for level in &sweep {
        println!(
            "{:>10.2} {:>10} {:>10} {:>8}",
            level.height, level.submerged, level.visible_land, level.islands
        );
    }
    if let (Some(first), Some(last)) = (levels.first(), levels.last()) {
        println!("Land lost from {:.2} to {:.2}: {} cells", first, last, tides.land_lost(*first, *last));
    }

    if let Some(height) = args.height {
        println!();
        println!("At water height {:.2}:", height);
        let islands = tides.islands(height);
        println!("  Visible land: {} cells", tides.total_visible_land(height));
        println!("  Islands: {}", islands.len());
        for (i, island) in islands.iter().enumerate() {
            println!(
                "    #{:<3} {:>6} cells, peak {:.2} at {}, spans {}x{}",
                i + 1,
                island.cell_count,
                island.max_elevation,
                island.peak,
                island.height(),
                island.width()
            );
        }

        if let Some(cell) = args.probe {
            match (tides.is_flooded(height, cell), tides.height_above_water(height, cell)) {
                (Ok(flooded), Ok(above)) => {
                    println!("  Cell {}: flooded={}, height above water {:.2}", cell, flooded, above);
                }
                (Err(e), _) | (_, Err(e)) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
    } else if args.probe.is_some() {
        eprintln!("Warning: --probe needs --height; ignoring");
    }
}
