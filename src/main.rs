use anyhow::Result;
use clap::Parser;
use protoplasm_core::init_logging;
use protoplasm_lib::model::config::AppConfig;
use protoplasm_lib::model::world::{TickReport, World};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Override the initial population
    #[arg(long)]
    population: Option<usize>,

    /// Override the number of colonies formed at start
    #[arg(long)]
    colonies: Option<usize>,

    /// Seconds per tick; defaults to 1 / target_tps
    #[arg(long)]
    delta: Option<f32>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Spawn a player-controlled cell
    #[arg(long)]
    player: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    ticks: u64,
    final_cells: usize,
    config_fingerprint: String,
    total_starvation_hits: u64,
    total_toxin_hits: u64,
    total_deaths: u64,
    total_colonies_disbanded: u64,
    last_tick: Option<TickReport>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)?;
    if let Some(population) = args.population {
        config.world.initial_population = population;
    }
    if let Some(colonies) = args.colonies {
        config.world.colony_count = colonies;
    }
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    config.validate()?;

    if args.dump_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let delta = args.delta.unwrap_or(1.0 / config.target_tps as f32);
    let mut world = World::new(config)?;
    if args.player {
        world.spawn_player();
    }

    let mut summary = RunSummary {
        config_fingerprint: world.config.fingerprint(),
        ..Default::default()
    };

    for _ in 0..args.ticks {
        let report = world.update(delta)?;
        summary.ticks += 1;
        summary.total_starvation_hits += u64::from(report.starvation_hits);
        summary.total_toxin_hits += u64::from(report.toxin_hits);
        summary.total_deaths += report.deaths as u64;
        summary.total_colonies_disbanded += report.colonies_disbanded as u64;
        summary.final_cells = report.cells;
        summary.last_tick = Some(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} ticks, {} cells, {} starvation hits, {} toxin hits, {} deaths, {} colonies disbanded ({:.1}s)",
            summary.ticks,
            summary.final_cells,
            summary.total_starvation_hits,
            summary.total_toxin_hits,
            summary.total_deaths,
            summary.total_colonies_disbanded,
            world.metrics.elapsed().as_secs_f32()
        );
    }

    Ok(())
}
