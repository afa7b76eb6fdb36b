use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which normal generator drives the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    /// MT19937 + polar method, reproduces the legacy published tables
    #[default]
    Mt19937,
    /// `rand`'s `StdRng` with `rand_distr::StandardNormal`
    StdRng,
}

/// Model parameters for the rationing simulation
///
/// All liter quantities are daily liters for the whole community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Generator seed
    pub seed: u32,
    pub sampler: SamplerKind,
    /// Inhabitants served (reported, not used by the model)
    pub population: u32,

    // Demand distribution
    pub baseline_demand: f64,
    pub demand_variability: f64,   // std as a fraction of baseline
    pub demand_floor_ratio: f64,   // clip floor = ratio × baseline
    pub demand_ceiling_ratio: f64, // clip ceiling = ratio × baseline

    // Supply distribution
    pub baseline_availability: f64,
    pub availability_variability: f64,
    pub availability_floor: f64, // survival minimum
    pub availability_ceiling: f64,

    /// Fraction of available water assigned to the priority group.
    /// The general group receives `1 - priority_fraction`.
    pub priority_fraction: f64,

    // Assumed fraction of total demand attributable to each group.
    // Independent weights, not a partition of demand.
    pub priority_group_share: f64,
    pub general_group_share: f64,

    // Acceptance model
    pub acceptance_priority_weight: f64,
    pub acceptance_general_weight: f64,
    pub acceptance_scale: f64,
    pub acceptance_noise_mean: f64,
    pub acceptance_noise_std: f64,
}

impl ModelConfig {
    /// Baseline case: 70/30 ethical rationing, seed 42
    pub fn baseline() -> Self {
        ModelConfig {
            seed: 42,
            sampler: SamplerKind::Mt19937,
            population: 5000,
            baseline_demand: 100_000.0,
            demand_variability: 0.3,
            demand_floor_ratio: 0.5,
            demand_ceiling_ratio: 2.0,
            baseline_availability: 80_000.0,
            availability_variability: 0.4,
            availability_floor: 20_000.0,
            availability_ceiling: 150_000.0,
            priority_fraction: 0.7,
            priority_group_share: 0.4,
            general_group_share: 0.3,
            acceptance_priority_weight: 0.7,
            acceptance_general_weight: 0.3,
            acceptance_scale: 0.8,
            acceptance_noise_mean: 10.0,
            acceptance_noise_std: 5.0,
        }
    }

    /// Equal split between groups (no prioritization)
    pub fn even_split() -> Self {
        ModelConfig {
            priority_fraction: 0.5,
            ..Self::baseline()
        }
    }

    /// Group shares that partition demand (40% priority, 60% general)
    pub fn partitioned_shares() -> Self {
        ModelConfig {
            general_group_share: 0.6,
            ..Self::baseline()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn general_fraction(&self) -> f64 {
        1.0 - self.priority_fraction
    }

    pub fn demand_std(&self) -> f64 {
        self.baseline_demand * self.demand_variability
    }

    pub fn availability_std(&self) -> f64 {
        self.baseline_availability * self.availability_variability
    }

    /// Closed clip interval for sampled demand
    pub fn demand_bounds(&self) -> (f64, f64) {
        (
            self.baseline_demand * self.demand_floor_ratio,
            self.baseline_demand * self.demand_ceiling_ratio,
        )
    }

    /// Closed clip interval for sampled availability
    pub fn availability_bounds(&self) -> (f64, f64) {
        (self.availability_floor, self.availability_ceiling)
    }

    /// Whether the two group shares sum to one
    pub fn group_shares_partition(&self) -> bool {
        (self.priority_group_share + self.general_group_share - 1.0).abs() < 1e-9
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::baseline()
    }
}

/// Optional export targets, all disabled by default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Monthly table as CSV
    pub csv: Option<PathBuf>,
    /// Four-panel chart as SVG
    pub charts: Option<PathBuf>,
    /// Run metadata, summary metrics and rows as JSON
    pub summary_json: Option<PathBuf>,
}

impl OutputSettings {
    pub fn any_enabled(&self) -> bool {
        self.csv.is_some() || self.charts.is_some() || self.summary_json.is_some()
    }
}

/// Contents of a run configuration file
///
/// ```toml
/// [model]
/// seed = 7
/// priority_fraction = 0.6
///
/// [output]
/// csv = "results/rationing.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: ModelConfig,
    pub output: OutputSettings,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_derived_parameters() {
        let config = ModelConfig::baseline();

        assert_eq!(config.demand_std(), 30_000.0);
        assert_eq!(config.availability_std(), 32_000.0);
        assert_eq!(config.demand_bounds(), (50_000.0, 200_000.0));
        assert_eq!(config.availability_bounds(), (20_000.0, 150_000.0));
        assert!((config.general_fraction() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn default_group_shares_do_not_partition_demand() {
        assert!(!ModelConfig::baseline().group_shares_partition());
        assert!(ModelConfig::partitioned_shares().group_shares_partition());
    }

    #[test]
    fn even_split_only_changes_fraction() {
        let even = ModelConfig::even_split();
        let baseline = ModelConfig::baseline();

        assert_eq!(even.priority_fraction, 0.5);
        assert_eq!(even.general_fraction(), 0.5);
        assert_eq!(
            ModelConfig {
                priority_fraction: baseline.priority_fraction,
                ..even
            },
            baseline
        );
    }

    #[test]
    fn partial_toml_falls_back_to_baseline() {
        let text = r#"
            [model]
            seed = 7
            sampler = "std_rng"
            priority_fraction = 0.6
        "#;
        let config = RunConfig::from_toml_str(text).unwrap();

        assert_eq!(config.model.seed, 7);
        assert_eq!(config.model.sampler, SamplerKind::StdRng);
        assert_eq!(config.model.priority_fraction, 0.6);
        assert_eq!(config.model.baseline_demand, 100_000.0);
        assert!(!config.output.any_enabled());
    }

    #[test]
    fn output_paths_parse() {
        let text = r#"
            [output]
            csv = "results/table.csv"
            charts = "results/charts.svg"
        "#;
        let config = RunConfig::from_toml_str(text).unwrap();

        assert_eq!(config.model, ModelConfig::baseline());
        assert_eq!(config.output.csv, Some(PathBuf::from("results/table.csv")));
        assert_eq!(
            config.output.charts,
            Some(PathBuf::from("results/charts.svg"))
        );
        assert!(config.output.summary_json.is_none());
        assert!(config.output.any_enabled());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let result = RunConfig::from_toml_str("[model]\nseed = \"forty-two\"");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let result = RunConfig::load("does/not/exist.toml");
        match result {
            Err(Error::ConfigRead { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.toml"))
            }
            other => panic!("Expected ConfigRead error, got {:?}", other),
        }
    }
}
