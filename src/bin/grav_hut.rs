//! Headless runner: picks a preset, ticks the simulation, reports the
//! command-surface observers on exit (spec.md §6's `BodyCount`,
//! `TotalMass`, `Frames`, `Fps`).
//!
//! There's no renderer here — spec.md §1 places windowing/rendering out of
//! scope. This binary exists only to drive `World` end to end the way a
//! UI layer would.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use grav_hut::{SimConfig, SystemType, World};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    None,
    SlowParticles,
    FastParticles,
    MassiveBody,
    OrbitalSystem,
    BinarySystem,
    PlanetarySystem,
    DistributionTest,
}

impl From<Preset> for SystemType {
    fn from(p: Preset) -> Self {
        match p {
            Preset::None => SystemType::None,
            Preset::SlowParticles => SystemType::SlowParticles,
            Preset::FastParticles => SystemType::FastParticles,
            Preset::MassiveBody => SystemType::MassiveBody,
            Preset::OrbitalSystem => SystemType::OrbitalSystem,
            Preset::BinarySystem => SystemType::BinarySystem,
            Preset::PlanetarySystem => SystemType::PlanetarySystem,
            Preset::DistributionTest => SystemType::DistributionTest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "grav_hut", about = "Headless Barnes-Hut N-body runner")]
struct Args {
    /// Initial-condition preset to generate.
    #[arg(long, value_enum, default_value = "orbital-system")]
    preset: Preset,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Optional TOML config file; falls back to defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the PRNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("failed to load config {path:?}: {err}, using defaults");
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    };

    let world = match args.seed {
        Some(seed) => World::with_seed(config, seed),
        None => World::new(config),
    };

    if let Err(err) = world.generate(args.preset.into()) {
        eprintln!("failed to generate preset: {err}");
        std::process::exit(1);
    }
    world.set_active(true);

    let start = Instant::now();
    for i in 0..args.ticks {
        if let Err(err) = world.tick() {
            eprintln!("tick {i} failed: {err}");
            std::process::exit(1);
        }
    }
    let elapsed = start.elapsed();

    println!("BodyCount: {}", world.body_count());
    println!("TotalMass: {:.6e}", world.total_mass());
    println!("Frames: {}", world.frames());
    println!("Fps: {:.2}", world.fps());
    println!("Elapsed: {:.3}s", elapsed.as_secs_f64());
}
