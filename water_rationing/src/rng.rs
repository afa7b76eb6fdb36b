//! Seeded normal sample generators
//!
//! [`LegacyGaussian`] ports the MT19937 + polar Box-Muller generator of the
//! legacy numeric stack, so a given seed reproduces the published tables
//! exactly. [`StdGaussian`] draws `rand_distr::StandardNormal` from any `rand`
//! generator; it is reproducible within a build but not against the legacy
//! stack.
//!
//! Generators are plain values: the pipeline borrows one mutably, so several
//! pipelines can run in one process without sharing state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt;
use std::fmt;

const TWO_POW_26: f64 = 67_108_864.0;
const TWO_POW_53: f64 = 9_007_199_254_740_992.0;

/// Source of normally distributed samples
pub trait GaussianSource {
    /// Next standard normal variate
    fn standard_normal(&mut self) -> f64;

    fn normal(&mut self, loc: f64, scale: f64) -> f64 {
        loc + scale * self.standard_normal()
    }

    /// `N` consecutive draws from Normal(loc, scale), in draw order
    fn normal_array<const N: usize>(&mut self, loc: f64, scale: f64) -> [f64; N]
    where
        Self: Sized,
    {
        std::array::from_fn(|_| self.normal(loc, scale))
    }
}

/// MT19937 (`init_genrand` seeding) feeding the polar method.
///
/// Each accepted pair yields two variates: the second half of the pair is
/// returned first, the first half is kept for the next call.
#[derive(Clone)]
pub struct LegacyGaussian {
    mt: Mt,
    spare: Option<f64>,
}

impl LegacyGaussian {
    pub fn new(seed: u32) -> Self {
        LegacyGaussian {
            mt: Mt::new(seed),
            spare: None,
        }
    }

    /// Uniform double in [0, 1) with 53 bits of precision from two words
    pub fn next_f64(&mut self) -> f64 {
        let a = f64::from(self.mt.next_u32() >> 5);
        let b = f64::from(self.mt.next_u32() >> 6);
        (a * TWO_POW_26 + b) / TWO_POW_53
    }
}

impl fmt::Debug for LegacyGaussian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyGaussian")
            .field("spare", &self.spare)
            .finish_non_exhaustive()
    }
}

impl GaussianSource for LegacyGaussian {
    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }

        let (x1, x2, r2) = loop {
            let x1 = 2.0 * self.next_f64() - 1.0;
            let x2 = 2.0 * self.next_f64() - 1.0;
            let r2 = x1 * x1 + x2 * x2;
            if r2 < 1.0 && r2 != 0.0 {
                break (x1, x2, r2);
            }
        };

        let f = (-2.0 * r2.ln() / r2).sqrt();
        self.spare = Some(f * x1);
        f * x2
    }
}

/// Standard normals from any `rand` generator
#[derive(Debug, Clone)]
pub struct StdGaussian<R> {
    rng: R,
}

impl<R: Rng> StdGaussian<R> {
    pub fn new(rng: R) -> Self {
        StdGaussian { rng }
    }
}

impl StdGaussian<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        StdGaussian::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GaussianSource for StdGaussian<R> {
    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}
