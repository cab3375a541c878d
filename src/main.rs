use anyhow::Result;
use clap::Parser;
use log::info;

use grid_traffic::simulation::{parse_cell, Cell, SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "grid_traffic")]
#[command(about = "Headless grid traffic simulation")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "20")]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value = "20")]
    height: i32,

    /// Number of vehicles to spawn at start
    #[arg(long, default_value = "25")]
    vehicles: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "100")]
    ticks: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Block a cell, given as x,y (repeatable)
    #[arg(long = "block", value_parser = parse_cell)]
    blocked: Vec<Cell>,

    /// Print the map every N ticks (0 prints only the initial and final map)
    #[arg(long, default_value = "10")]
    map_every: u32,

    /// Real time to wait between ticks, in milliseconds
    #[arg(long, default_value = "0")]
    interval_ms: u64,
}

impl Cli {
    fn to_config(&self) -> SimConfig {
        SimConfig {
            width: self.width,
            height: self.height,
            vehicles: self.vehicles,
            ticks: self.ticks,
            seed: self.seed,
            blocked: self.blocked.clone(),
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("grid_traffic=info"))
        .init();

    let cli = Cli::parse();
    let config = cli.to_config();
    run_headless(&config, cli.map_every, cli.interval_ms)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(config: &SimConfig, map_every: u32, interval_ms: u64) -> Result<()> {
    let mut world = SimWorld::from_config(config)?;
    info!(
        "Running {} ticks with {} vehicles",
        config.ticks,
        world.count()
    );

    println!("Initial state:");
    print!("{}", world.summary());
    println!("{}", world.render_map());

    let mut moves = 0;
    for tick in 1..=config.ticks {
        let report = world.tick();
        moves += report.moved;

        if map_every > 0 && tick % map_every == 0 && tick < config.ticks {
            println!("--- After tick {} ---", tick);
            print!("{}", world.summary());
            println!("{}", world.render_map());
        }

        if interval_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(interval_ms));
        }
    }

    let arrived = world.list().iter().filter(|v| v.has_arrived()).count();
    info!(
        "Finished after {} ticks: {} moves, {}/{} vehicles at destination",
        world.tick_count(),
        moves,
        arrived,
        world.count()
    );

    println!("=== Final State ===");
    print!("{}", world.summary());
    println!("{}", world.render_map());
    Ok(())
}
