//! Headless Battle Simulator
//!
//! Loads a scenario (galaxy snapshot plus battle orders), resolves every
//! battle and writes each species' combat logs.

use std::path::PathBuf;

use clap::Parser;
use fleet_combat::combat::write_species_logs;
use fleet_combat::core::config::CombatConfig;
use fleet_combat::core::error::Result;
use fleet_combat::scenario::Scenario;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Headless Battle Simulator - resolve one turn of battles
#[derive(Parser, Debug)]
#[command(name = "battle_sim")]
#[command(about = "Resolve the battles of a scenario file and write combat logs")]
struct Args {
    /// Scenario file (JSON)
    #[arg(long)]
    scenario: PathBuf,

    /// Random seed for deterministic runs (overrides the scenario's seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Combat configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for per-species combat logs
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_combat=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };
    let scenario = Scenario::load(&args.scenario)?;

    let seed = args
        .seed
        .or(scenario.seed)
        .unwrap_or_else(rand::random);
    tracing::info!("Running {} with seed {}", args.scenario.display(), seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let output = scenario.run(&config, &mut rng)?;

    if let Some(dir) = &args.report_dir {
        // Battle results stand even if the logs cannot be written
        if let Err(e) = write_species_logs(&output.galaxy, dir) {
            tracing::warn!("Failed to write combat logs to {}: {}", dir.display(), e);
        }
    }

    match args.format.as_str() {
        "json" => println!("{}", output.to_json()),
        _ => println!("{}", output.summary()),
    }

    Ok(())
}
