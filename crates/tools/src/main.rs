use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delve_core::chase::{tile_center, world_cell};
use delve_core::mapgen::paint;
use delve_core::{Cell, DelveConfig, Dungeon, Encounter, MapGenerator, NavState, SeedChoice};
use log::info;
use serde::Serialize;

mod ascii;

use ascii::AsciiCanvas;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Generation seed; a runtime seed is drawn when omitted
    #[arg(short, long, global = true)]
    seed: Option<u64>,
    /// TOML config file; built-in defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated dungeon
    Render {
        /// Emit a JSON report instead of ASCII
        #[arg(long)]
        json: bool,
    },
    /// Find a path between two world cells, formatted as `x,y`
    Path {
        /// Defaults to the dungeon start
        #[arg(long, value_parser = parse_cell)]
        from: Option<Cell>,
        /// Defaults to a random floor cell
        #[arg(long, value_parser = parse_cell)]
        to: Option<Cell>,
    },
    /// Chase the player, parked on the start cell, for a number of fixed steps
    Simulate {
        #[arg(long, default_value_t = 500)]
        steps: u32,
        /// Fixed step length in seconds
        #[arg(long, default_value_t = 0.02)]
        dt: f32,
    },
}

#[derive(Serialize)]
struct DungeonReport<'a> {
    seed: u64,
    fingerprint: String,
    floor_count: usize,
    wall_count: usize,
    dungeon: &'a Dungeon,
}

fn parse_cell(raw: &str) -> Result<Cell, String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("cell '{raw}' must look like x,y"))?;
    let parse = |part: &str| {
        let part = part.trim();
        part.parse::<i32>().map_err(|_| format!("'{part}' in cell '{raw}' is not an integer"))
    };
    Ok(Cell::new(parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DelveConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DelveConfig::default(),
    };
    let seed = SeedChoice::resolve(cli.seed);
    info!("using seed {seed:?}");

    let mut rng = seed.rng();
    let dungeon = MapGenerator::new(config.generator.clone()).generate(&mut rng);

    match cli.command {
        Commands::Render { json } => {
            if json {
                let report = DungeonReport {
                    seed: seed.value(),
                    fingerprint: format!("0x{:016x}", dungeon.fingerprint()),
                    floor_count: dungeon.floor().len(),
                    wall_count: dungeon.walls().len(),
                    dungeon: &dungeon,
                };
                let text = serde_json::to_string_pretty(&report)
                    .with_context(|| "Failed to serialize dungeon report")?;
                println!("{text}");
            } else {
                let mut canvas = AsciiCanvas::default();
                paint(&dungeon, &mut canvas);
                canvas.mark(dungeon.start(), '@');
                print!("{}", canvas.render());
                println!("Seed: {}", seed.value());
                println!("Floor cells: {}", dungeon.floor().len());
            }
        }
        Commands::Path { from, to } => {
            let from = from.unwrap_or(dungeon.start());
            let to = match to {
                Some(cell) => cell,
                None => dungeon
                    .pick_spawn_cells(1, &mut rng)
                    .first()
                    .copied()
                    .unwrap_or(dungeon.start()),
            };
            let grid = dungeon.walkability_grid(config.chase.map_width, config.chase.map_height)?;
            let path = grid
                .find_path(from, to)
                .with_context(|| format!("No route from {from} to {to}"))?;

            let mut canvas = AsciiCanvas::default();
            paint(&dungeon, &mut canvas);
            for &cell in &path {
                canvas.mark(cell, '*');
            }
            canvas.mark(from, 'S');
            canvas.mark(to, 'T');
            print!("{}", canvas.render());
            println!("Path {from} -> {to}: {} steps", path.len());
        }
        Commands::Simulate { steps, dt } => {
            let mut encounter = Encounter::new(&dungeon, &config.chase)?;
            let count = config.generator.enemy_count;
            encounter.spawn_enemies(&dungeon, count, &config.chase, &mut rng);

            for step in 1..=steps {
                encounter.step(dt);
                if step % 50 == 0 {
                    let chasing = encounter.chasing_count();
                    info!("step {step}: {chasing} of {} enemies chasing", encounter.len());
                }
            }

            let mut canvas = AsciiCanvas::default();
            paint(&dungeon, &mut canvas);
            canvas.mark(world_cell(encounter.target()), '@');
            for enemy in encounter.enemies() {
                let glyph = if enemy.brain.state() == NavState::Chase { 'E' } else { 'e' };
                canvas.mark(world_cell(enemy.position), glyph);
            }
            print!("{}", canvas.render());

            let player = tile_center(dungeon.start());
            for enemy in encounter.enemies() {
                println!(
                    "{:?} at {} ({:.1} tiles from the player)",
                    enemy.brain.state(),
                    world_cell(enemy.position),
                    enemy.position.distance(player)
                );
            }
        }
    }

    Ok(())
}
