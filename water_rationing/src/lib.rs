//! Water Rationing Policy Simulation
//!
//! Generates a synthetic twelve-month dataset for a community living under an
//! ethical rationing policy: a fixed fraction of the available water goes to a
//! prioritized group (children under five, the chronically ill, the elderly)
//! and the remainder to the general population.
//!
//! Pipeline stages, in the order data flows through them:
//! - [`rng`]: seeded normal samples
//! - [`supply`]: monthly demand and availability, clipped to realistic bounds
//! - [`allocation`]: priority/general split and per-group service levels
//! - [`acceptance`]: community acceptance score with subjective noise
//! - [`dataset`]: labeled monthly table
//! - [`report`], [`charts`], [`output`]: presentation and export
//!
//! The month count is fixed; every series is a `[f64; NUM_MONTHS]`.

pub mod acceptance;
pub mod allocation;
pub mod analysis;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod report;
pub mod rng;
pub mod simulation;
pub mod supply;
pub mod sweep;

pub use config::{ModelConfig, OutputSettings, RunConfig, SamplerKind};
pub use dataset::{MonthlyRecord, RationingTable, TableRow};
pub use error::{Error, Result};
pub use simulation::{run_pipeline, simulate};

/// Months simulated per run (January - December)
pub const NUM_MONTHS: usize = 12;

/// Month labels in table order
pub const MONTH_LABELS: [&str; NUM_MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Divisor used when presenting liter quantities in thousands
pub const LITERS_PER_THOUSAND: f64 = 1000.0;
