use crate::RationingTable;
use serde::Serialize;

/// Compute mean of a series
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute population standard deviation of a series
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Distribution of one metric across runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanStd {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl MeanStd {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return MeanStd {
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        MeanStd {
            mean: mean(values),
            std: std_dev(values),
            min: values.iter().cloned().fold(f64::INFINITY, f64::min),
            max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Annual means of every numeric column (liters in thousands)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub demand: f64,
    pub availability: f64,
    pub priority_allocation: f64,
    pub general_allocation: f64,
    pub priority_service_level: f64,
    pub general_service_level: f64,
    pub acceptance: f64,
}

impl SummaryMetrics {
    pub fn from_table(table: &RationingTable) -> Self {
        SummaryMetrics {
            demand: mean(&table.column(|r| r.demand)),
            availability: mean(&table.column(|r| r.availability)),
            priority_allocation: mean(&table.column(|r| r.priority_allocation)),
            general_allocation: mean(&table.column(|r| r.general_allocation)),
            priority_service_level: mean(&table.column(|r| r.priority_service_level)),
            general_service_level: mean(&table.column(|r| r.general_service_level)),
            acceptance: mean(&table.column(|r| r.acceptance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{simulate, ModelConfig};
    use approx::assert_relative_eq;

    #[test]
    fn mean_and_std() {
        let values = [0.9, 1.0, 1.1, 1.0, 0.9];
        assert_relative_eq!(mean(&values), 0.98, epsilon = 1e-10);
        assert!((std_dev(&values) - 0.0748).abs() < 0.001);
    }

    #[test]
    fn empty_series_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(MeanStd::from_values(&[]).max, 0.0);
    }

    #[test]
    fn mean_std_extremes() {
        let stats = MeanStd::from_values(&[3.0, -1.0, 4.0, 2.0]);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 4.0);
        assert_relative_eq!(stats.mean, 2.0);
    }

    #[test]
    fn baseline_summary_to_one_decimal() {
        let summary = SummaryMetrics::from_table(&simulate(&ModelConfig::baseline()));

        assert_eq!(format!("{:.1}", summary.demand), "108.9");
        assert_eq!(format!("{:.1}", summary.availability), "61.2");
        assert_eq!(format!("{:.1}", summary.priority_service_level), "76.4");
        assert_eq!(format!("{:.1}", summary.general_service_level), "55.8");
        assert_eq!(format!("{:.1}", summary.acceptance), "65.2");
    }

    #[test]
    fn allocation_means_split_availability() {
        let summary = SummaryMetrics::from_table(&simulate(&ModelConfig::baseline()));
        assert_relative_eq!(
            summary.priority_allocation + summary.general_allocation,
            summary.availability,
            epsilon = 1e-9
        );
    }
}
