//! Demand and availability model
//!
//! One normal draw per month for each series, demand first, then clipped to
//! a closed interval. Clipping saturates outliers, it never rejects them.

use crate::rng::GaussianSource;
use crate::{ModelConfig, NUM_MONTHS};

/// Saturate `value` to `[lo, hi]`
///
/// Floor first, then ceiling; NaN passes through unchanged.
pub fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Monthly demand in liters, clipped to the configured multiples of baseline
pub fn sample_demand<G: GaussianSource>(config: &ModelConfig, rng: &mut G) -> [f64; NUM_MONTHS] {
    let (lo, hi) = config.demand_bounds();
    rng.normal_array::<NUM_MONTHS>(config.baseline_demand, config.demand_std())
        .map(|demand| clip(demand, lo, hi))
}

/// Monthly available supply in liters, clipped to the survival floor and the
/// infrastructure ceiling
pub fn sample_availability<G: GaussianSource>(
    config: &ModelConfig,
    rng: &mut G,
) -> [f64; NUM_MONTHS] {
    let (lo, hi) = config.availability_bounds();
    rng.normal_array::<NUM_MONTHS>(config.baseline_availability, config.availability_std())
        .map(|availability| clip(availability, lo, hi))
}
