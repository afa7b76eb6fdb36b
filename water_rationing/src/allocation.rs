//! Ethical rationing policy
//!
//! Available water is split between the priority group and the general
//! population by a fixed fraction. A group's service level is the share of
//! its estimated demand that its allocation covers, capped at 100%.

use crate::ModelConfig;

/// Liters assigned to each group in one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub priority: f64,
    pub general: f64,
}

impl Allocation {
    pub fn total(&self) -> f64 {
        self.priority + self.general
    }
}

/// Split `availability` into priority and general allocations
///
/// The general fraction is `1 - priority_fraction`, so the two parts always
/// add back up to `availability`.
pub fn allocate(availability: f64, priority_fraction: f64) -> Allocation {
    Allocation {
        priority: availability * priority_fraction,
        general: availability * (1.0 - priority_fraction),
    }
}

/// Percentage of a group's estimated demand met by its allocation
///
/// Estimated demand is `demand × group_share`; the demand clip floor keeps it
/// strictly positive.
pub fn service_level(allocation: f64, demand: f64, group_share: f64) -> f64 {
    (allocation / (demand * group_share)).min(1.0) * 100.0
}

/// Service level per group, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLevels {
    pub priority: f64,
    pub general: f64,
}

impl ServiceLevels {
    pub fn compute(allocation: &Allocation, demand: f64, config: &ModelConfig) -> Self {
        ServiceLevels {
            priority: service_level(allocation.priority, demand, config.priority_group_share),
            general: service_level(allocation.general, demand, config.general_group_share),
        }
    }
}
