use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use swarm_client::{load_settings, RunOptions, Script, Simulation};
use swarm_shared::SteeringSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless robot swarm simulation", long_about = None)]
struct Args {
    /// Number of robots created at start-up
    #[arg(short, long, default_value_t = 50)]
    robots: usize,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// RNG seed; a random one is picked and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with behavior switches and weights
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON file with scripted interactions ({"tick": N, "type": ...} entries)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write a world snapshot every N frames
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Snapshot output file (JSON lines); defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pace the loop to this many frames per second
    #[arg(long)]
    fps: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Swarm client starting...");
    log::info!("Robots: {}, ticks: {}, seed: {}", args.robots, args.ticks, seed);

    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => SteeringSettings::default(),
    };

    let mut simulation =
        Simulation::new(args.robots, seed, settings).context("Failed to initialize simulation")?;
    if let Some(path) = &args.script {
        simulation = simulation.with_script(Script::load(path)?);
    }

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let options = RunOptions {
        ticks: args.ticks,
        snapshot_every: args.snapshot_every,
        target_fps: args.fps,
    };
    let summary = simulation
        .run(&options, &mut sink)
        .context("Simulation error")?;

    log::info!(
        "Finished {} frames in {:.2?}: {} goals reached, {} snapshots written",
        summary.frames,
        summary.elapsed,
        summary.goals_reached,
        summary.snapshots_written
    );
    log::info!("Status: {}", serde_json::to_string(&summary.status())?);

    Ok(())
}
