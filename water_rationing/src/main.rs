//! Water Rationing Policy Simulation - Main Report
//!
//! Runs the twelve-month pipeline once and prints the case-study report.
//!
//! Usage:
//!   cargo run --release --bin water_rationing
//!   cargo run --release --bin water_rationing -- experiments/export_all.toml

use std::env;
use std::io::{self, Write};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use water_rationing::{output, report, simulate, RunConfig};

fn main() -> water_rationing::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [run_config.toml]", args[0]);
        process::exit(1);
    }

    let run_config = match args.get(1) {
        Some(path) => {
            info!(path = %path, "loading run config");
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };

    let table = simulate(&run_config.model);
    info!(
        seed = run_config.model.seed,
        months = table.len(),
        "simulation complete"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&table, &run_config.model, &mut out)?;
    out.flush()?;

    output::export(&table, &run_config.model, &run_config.output)?;
    Ok(())
}
