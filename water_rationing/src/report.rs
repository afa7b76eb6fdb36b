//! Printed case-study report
//!
//! Fixed layout: banner, executive summary, annual means, notes on the
//! coordinator's decisions, the monthly table and a closing conclusion. All
//! values are rounded to one decimal.

use crate::analysis::SummaryMetrics;
use crate::{ModelConfig, RationingTable, NUM_MONTHS};
use std::io::{self, Write};

const RULE_WIDTH: usize = 80;

/// Headers printed above the monthly table, one per column
pub const TABLE_HEADERS: [&str; 8] = [
    "Month",
    "Demand (k L)",
    "Availability (k L)",
    "Priority alloc (k L)",
    "General alloc (k L)",
    "Priority service (%)",
    "General service (%)",
    "Acceptance (%)",
];

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Write the full report for `table`
pub fn write_report<W: Write>(
    table: &RationingTable,
    config: &ModelConfig,
    out: &mut W,
) -> io::Result<()> {
    let summary = SummaryMetrics::from_table(table);
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "      CASE STUDY: STOCHASTIC DETERMINISM AND STRUCTURED AGENCY")?;
    writeln!(out, "   Community water crisis under ethical rationing (seed {})", config.seed)?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "\n--- EXECUTIVE SUMMARY ---")?;
    writeln!(out, "Population served: {} inhabitants", config.population)?;
    writeln!(
        out,
        "Simulation length: {} months (January - December)",
        NUM_MONTHS
    )?;
    writeln!(out, "Policy implemented: ethical rationing (distributive justice)")?;
    writeln!(
        out,
        "   - {} of available water for priority groups (children under 5, chronically ill, elderly)",
        percent(config.priority_fraction)
    )?;
    writeln!(
        out,
        "   - {} for the rest of the population",
        percent(config.general_fraction())
    )?;

    write_metrics(&summary, out)?;

    writeln!(out, "\n--- STRUCTURED AGENCY OF THE COMMUNITY COORDINATOR ---")?;
    writeln!(
        out,
        "The coordinator acted within structural limits: crisis conditions, scarce supply, local social ties."
    )?;
    writeln!(out, "The coordinator's agency showed in three decisions:")?;
    writeln!(
        out,
        "  1. Declining outside aid that required handing over sensitive household data."
    )?;
    writeln!(out, "  2. Introducing an ethical rationing scheme that serves the most vulnerable first.")?;
    writeln!(
        out,
        "  3. Negotiating transport from a local business in exchange for services."
    )?;
    writeln!(
        out,
        "Bounded as they were, these decisions changed how the community absorbed each shortage."
    )?;

    writeln!(out, "\n--- MONTHLY DETAIL ---")?;
    write_table(table, out)?;

    writeln!(out, "\n--- CONCLUSION ---")?;
    writeln!(
        out,
        "Stochastic determinism does not cancel agency; it reframes it as structured agency."
    )?;
    writeln!(
        out,
        "Even with high uncertainty in demand and supply, deliberate allocation choices keep"
    )?;
    writeln!(
        out,
        "priority service well above what the raw supply would suggest, and acceptance follows."
    )?;

    Ok(())
}

/// Annual means block
pub fn write_metrics<W: Write>(summary: &SummaryMetrics, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n--- KEY METRICS (ANNUAL MEAN) ---")?;
    writeln!(out, "Mean monthly demand: {:.1} thousand liters", summary.demand)?;
    writeln!(
        out,
        "Mean monthly availability: {:.1} thousand liters",
        summary.availability
    )?;
    writeln!(
        out,
        "Mean priority service level: {:.1}%",
        summary.priority_service_level
    )?;
    writeln!(
        out,
        "Mean general service level: {:.1}%",
        summary.general_service_level
    )?;
    writeln!(out, "Mean community acceptance: {:.1}%", summary.acceptance)?;
    Ok(())
}

/// Monthly table, right-aligned columns, one decimal
pub fn write_table<W: Write>(table: &RationingTable, out: &mut W) -> io::Result<()> {
    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .map(|h| format!("{:>width$}", h, width = h.len()))
        .collect();
    writeln!(out, "{}", header.join("  "))?;

    for row in table.rows() {
        let mut cells = vec![format!("{:>width$}", row.month, width = TABLE_HEADERS[0].len())];
        for (value, heading) in row.values().iter().zip(&TABLE_HEADERS[1..]) {
            cells.push(format!("{:>width$.1}", value, width = heading.len()));
        }
        writeln!(out, "{}", cells.join("  "))?;
    }
    Ok(())
}

/// The report as a string
pub fn render_report(table: &RationingTable, config: &ModelConfig) -> io::Result<String> {
    let mut buf = Vec::new();
    write_report(table, config, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
