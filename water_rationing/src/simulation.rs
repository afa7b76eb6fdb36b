//! Single-pass rationing pipeline
//!
//! Draw order is fixed: 12 demand samples, 12 availability samples, then 12
//! acceptance noise samples. Any change to that order changes every table
//! produced for a seed.

use crate::acceptance;
use crate::allocation::{self, Allocation, ServiceLevels};
use crate::dataset::{MonthlySeries, RationingTable};
use crate::rng::{GaussianSource, LegacyGaussian, StdGaussian};
use crate::supply;
use crate::{ModelConfig, SamplerKind, NUM_MONTHS};
use tracing::debug;

/// Run the pipeline with a caller-supplied generator
pub fn run_pipeline<G: GaussianSource>(config: &ModelConfig, rng: &mut G) -> RationingTable {
    let demand = supply::sample_demand(config, rng);
    let availability = supply::sample_availability(config, rng);

    let allocations: [Allocation; NUM_MONTHS] =
        availability.map(|a| allocation::allocate(a, config.priority_fraction));
    let service_levels: [ServiceLevels; NUM_MONTHS] = std::array::from_fn(|m| {
        ServiceLevels::compute(&allocations[m], demand[m], config)
    });

    let noise = acceptance::sample_noise(config, rng);
    let acceptance: [f64; NUM_MONTHS] =
        std::array::from_fn(|m| acceptance::score(&service_levels[m], noise[m], config));

    RationingTable::assemble(MonthlySeries {
        demand,
        availability,
        allocations,
        service_levels,
        acceptance,
    })
}

/// Run the pipeline with the generator named by `config.sampler`, seeded from
/// `config.seed`
pub fn simulate(config: &ModelConfig) -> RationingTable {
    debug!(
        seed = config.seed,
        sampler = ?config.sampler,
        priority_fraction = config.priority_fraction,
        "running rationing pipeline"
    );
    if !config.group_shares_partition() {
        debug!(
            priority_share = config.priority_group_share,
            general_share = config.general_group_share,
            "group demand shares do not sum to 1"
        );
    }

    let table = match config.sampler {
        SamplerKind::Mt19937 => run_pipeline(config, &mut LegacyGaussian::new(config.seed)),
        SamplerKind::StdRng => {
            run_pipeline(config, &mut StdGaussian::seeded(u64::from(config.seed)))
        }
    };

    for record in table.records() {
        debug!(
            month = record.month,
            demand = record.demand,
            availability = record.availability,
            priority_service = record.priority_service_level,
            general_service = record.general_service_level,
            acceptance = record.acceptance,
            "month simulated"
        );
    }

    table
}
