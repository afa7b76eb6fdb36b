//! Community acceptance of the policy
//!
//! Acceptance follows the weighted service levels, scaled down, plus a noise
//! term for the subjectivity of perceived fairness. The noise block is the
//! last set of draws taken from the generator in a run.

use crate::allocation::ServiceLevels;
use crate::rng::GaussianSource;
use crate::supply::clip;
use crate::{ModelConfig, NUM_MONTHS};

/// Monthly perception noise, Normal(noise_mean, noise_std)
pub fn sample_noise<G: GaussianSource>(config: &ModelConfig, rng: &mut G) -> [f64; NUM_MONTHS] {
    rng.normal_array::<NUM_MONTHS>(config.acceptance_noise_mean, config.acceptance_noise_std)
}

/// Acceptance percentage for one month, clipped to [0, 100]
pub fn score(levels: &ServiceLevels, noise: f64, config: &ModelConfig) -> f64 {
    let weighted = levels.priority * config.acceptance_priority_weight
        + levels.general * config.acceptance_general_weight;
    clip(weighted * config.acceptance_scale + noise, 0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn levels(priority: f64, general: f64) -> ServiceLevels {
        ServiceLevels { priority, general }
    }

    #[test]
    fn full_service_scores_eighty_plus_noise() {
        let config = ModelConfig::baseline();
        assert_abs_diff_eq!(score(&levels(100.0, 100.0), 10.0, &config), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn weighted_combination() {
        let config = ModelConfig::baseline();
        // (36.5 × 0.7 + 20.9 × 0.3) × 0.8 + 7.0
        let value = score(&levels(36.5, 20.9), 7.0, &config);
        assert_abs_diff_eq!(value, 32.456, epsilon = 1e-9);
    }

    #[test]
    fn clipped_to_percentage_range() {
        let config = ModelConfig::baseline();
        assert_eq!(score(&levels(100.0, 100.0), 35.0, &config), 100.0);
        assert_eq!(score(&levels(0.0, 0.0), -4.0, &config), 0.0);
    }

    #[test]
    fn noise_uses_configured_distribution() {
        struct Unit;
        impl GaussianSource for Unit {
            fn standard_normal(&mut self) -> f64 {
                1.0
            }
        }

        let config = ModelConfig::baseline();
        let noise = sample_noise(&config, &mut Unit);
        assert!(noise.iter().all(|&n| n == 15.0));
    }
}
