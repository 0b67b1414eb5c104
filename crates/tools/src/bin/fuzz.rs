use anyhow::{Result, ensure};
use clap::Parser;
use delve_core::mapgen::generate_dungeon;
use delve_core::pathfinding::reachable_cells;
use delve_core::{DelveConfig, GeneratorConfig};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of dungeons to generate and check
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Path queries per dungeon
    #[arg(short, long, default_value_t = 20)]
    queries: usize,
}

fn check_dungeon(config: &GeneratorConfig, dungeon_seed: u64, queries: usize) -> Result<()> {
    let dungeon = generate_dungeon(config, dungeon_seed);
    ensure!(dungeon.is_floor(dungeon.start()), "start missing from floor on seed {dungeon_seed}");

    let walls = dungeon.walls();
    ensure!(walls.is_disjoint(dungeon.floor()), "wall painted over floor on seed {dungeon_seed}");

    let grid = dungeon.full_walkability_grid()?;
    ensure!(
        grid.walkable_count() == dungeon.floor().len(),
        "full grid dropped floor cells on seed {dungeon_seed}"
    );
    ensure!(
        &reachable_cells(&grid, dungeon.start()) == dungeon.floor(),
        "disconnected floor on seed {dungeon_seed}"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(dungeon_seed);
    for cell in dungeon.pick_spawn_cells(queries, &mut rng) {
        let path = grid.find_path(dungeon.start(), cell)?;
        ensure!(
            path.len() >= dungeon.start().manhattan(cell) as usize,
            "path to {cell} shorter than its Manhattan distance on seed {dungeon_seed}"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} dungeons...", args.seed, args.runs);
    let config = DelveConfig::default().generator;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for _ in 0..args.runs {
        check_dungeon(&config, rng.next_u64(), args.queries)?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
