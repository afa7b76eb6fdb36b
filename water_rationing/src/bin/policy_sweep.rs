//! Policy Sweep Runner
//!
//! Runs the rationing pipeline for each default priority fraction over a
//! range of seeds and reports how service levels and acceptance are
//! distributed across runs.
//!
//! Usage:
//!   cargo run --release --bin policy_sweep -- 500
//!   cargo run --release --bin policy_sweep -- 500 results/policy_sweep.csv

use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use water_rationing::sweep::{run_sweep, write_sweep_csv, DEFAULT_FRACTIONS};
use water_rationing::ModelConfig;

const DEFAULT_NUM_SEEDS: u32 = 200;

fn main() -> water_rationing::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 3 {
        eprintln!("Usage: {} [num_seeds] [output.csv]", args[0]);
        process::exit(1);
    }

    let num_seeds = match args.get(1) {
        Some(raw) => raw.parse::<u32>().unwrap_or_else(|e| {
            eprintln!("Invalid seed count {:?}: {}", raw, e);
            process::exit(1);
        }),
        None => DEFAULT_NUM_SEEDS,
    };

    let base = ModelConfig::baseline();
    let seeds = base.seed..base.seed.saturating_add(num_seeds);

    println!("=== Rationing Policy Sweep ===\n");
    println!(
        "Priority fractions: {:?} × {} seeds (from {})\n",
        DEFAULT_FRACTIONS, num_seeds, base.seed
    );

    let start = Instant::now();
    let points = run_sweep(&base, &DEFAULT_FRACTIONS, seeds);
    info!(
        runs = points.iter().map(|p| p.runs).sum::<usize>(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "sweep complete"
    );

    println!(
        "{:>8}  {:>20}  {:>20}  {:>20}",
        "Priority", "Priority service (%)", "General service (%)", "Acceptance (%)"
    );
    for point in &points {
        println!(
            "{:>7.0}%  {:>12.1} ± {:>5.1}  {:>12.1} ± {:>5.1}  {:>12.1} ± {:>5.1}",
            point.priority_fraction * 100.0,
            point.priority_service_level.mean,
            point.priority_service_level.std,
            point.general_service_level.mean,
            point.general_service_level.std,
            point.acceptance.mean,
            point.acceptance.std,
        );
    }

    if let Some(path) = args.get(2) {
        let path = Path::new(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        write_sweep_csv(&points, fs::File::create(path)?)?;
        println!("\nResults saved to: {}", path.display());
    }

    println!(
        "\n✓ Sweep complete in {:.1}s",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
