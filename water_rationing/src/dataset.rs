//! Monthly dataset assembly
//!
//! Joins the per-month series into one record per month. Records keep liters;
//! [`TableRow`] is the presentation view with liter columns in thousands.

use crate::allocation::{Allocation, ServiceLevels};
use crate::{LITERS_PER_THOUSAND, MONTH_LABELS, NUM_MONTHS};
use serde::Serialize;

/// Column names of the assembled table, in display order
pub const COLUMN_NAMES: [&str; 8] = [
    "month",
    "demand",
    "availability",
    "priority_allocation",
    "general_allocation",
    "priority_service_level",
    "general_service_level",
    "acceptance",
];

/// Per-month arrays produced by the pipeline stages
#[derive(Debug, Clone)]
pub struct MonthlySeries {
    pub demand: [f64; NUM_MONTHS],
    pub availability: [f64; NUM_MONTHS],
    pub allocations: [Allocation; NUM_MONTHS],
    pub service_levels: [ServiceLevels; NUM_MONTHS],
    pub acceptance: [f64; NUM_MONTHS],
}

/// One simulated month (liters, percentages)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRecord {
    pub month: &'static str,
    pub demand: f64,
    pub availability: f64,
    pub priority_allocation: f64,
    pub general_allocation: f64,
    pub priority_service_level: f64,
    pub general_service_level: f64,
    pub acceptance: f64,
}

impl MonthlyRecord {
    /// Presentation view with liter columns in thousands
    pub fn to_row(&self) -> TableRow {
        TableRow {
            month: self.month,
            demand: self.demand / LITERS_PER_THOUSAND,
            availability: self.availability / LITERS_PER_THOUSAND,
            priority_allocation: self.priority_allocation / LITERS_PER_THOUSAND,
            general_allocation: self.general_allocation / LITERS_PER_THOUSAND,
            priority_service_level: self.priority_service_level,
            general_service_level: self.general_service_level,
            acceptance: self.acceptance,
        }
    }
}

/// Table row as printed and exported (thousands of liters, percentages)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub month: &'static str,
    pub demand: f64,
    pub availability: f64,
    pub priority_allocation: f64,
    pub general_allocation: f64,
    pub priority_service_level: f64,
    pub general_service_level: f64,
    pub acceptance: f64,
}

impl TableRow {
    /// Numeric cells in column order (everything after `month`)
    pub fn values(&self) -> [f64; 7] {
        [
            self.demand,
            self.availability,
            self.priority_allocation,
            self.general_allocation,
            self.priority_service_level,
            self.general_service_level,
            self.acceptance,
        ]
    }
}

/// Twelve monthly records, Jan through Dec
///
/// Records can only be read once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct RationingTable {
    records: Vec<MonthlyRecord>,
}

impl RationingTable {
    pub fn assemble(series: MonthlySeries) -> Self {
        let records = MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(m, &month)| MonthlyRecord {
                month,
                demand: series.demand[m],
                availability: series.availability[m],
                priority_allocation: series.allocations[m].priority,
                general_allocation: series.allocations[m].general,
                priority_service_level: series.service_levels[m].priority,
                general_service_level: series.service_levels[m].general,
                acceptance: series.acceptance[m],
            })
            .collect();

        RationingTable { records }
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.records.iter().map(MonthlyRecord::to_row).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One presentation column across all months
    pub fn column<F>(&self, select: F) -> Vec<f64>
    where
        F: Fn(&TableRow) -> f64,
    {
        self.rows().iter().map(select).collect()
    }
}
