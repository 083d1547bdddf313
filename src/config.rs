/*!
Selects a proposal strategy by name and builds the matching sampler.

```rust
use mini_mh::config::SamplerConfig;

let config = SamplerConfig::new("random-walk".parse().unwrap(), 2_000).set_seed(1);
let samples: Vec<f64> = config.run(|x: f64| (-x * x / 2.0).exp()).unwrap();
assert_eq!(samples.len(), 2_000);
```
*/

use num_traits::Float;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Open01, Standard};

use crate::distributions::{ProposalKind, Target};
use crate::error::MhError;
use crate::metropolis_hastings::{MhSampler, ZeroDensityPolicy};

/// Everything needed to build a sampler apart from the target density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    pub n_samples: usize,
    pub proposal: ProposalKind,
    /// Fixed seed for reproducible runs; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    pub zero_density: ZeroDensityPolicy,
}

impl SamplerConfig {
    pub fn new(proposal: ProposalKind, n_samples: usize) -> Self {
        Self {
            n_samples,
            proposal,
            seed: None,
            zero_density: ZeroDensityPolicy::default(),
        }
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn zero_density_policy(mut self, policy: ZeroDensityPolicy) -> Self {
        self.zero_density = policy;
        self
    }

    pub fn build<T, D>(&self, target: D) -> MhSampler<T, D, ProposalKind, SmallRng>
    where
        T: Float,
        D: Target<T>,
        Standard: Distribution<T>,
        Open01: Distribution<T>,
    {
        let sampler = MhSampler::new(self.n_samples, target, self.proposal)
            .with_zero_density_policy(self.zero_density);
        match self.seed {
            Some(seed) => sampler.set_seed(seed),
            None => sampler,
        }
    }

    /// Builds a fresh sampler for `target` and runs it once.
    pub fn run<T, D>(&self, target: D) -> Result<Vec<T>, MhError>
    where
        T: Float,
        D: Target<T>,
        Standard: Distribution<T>,
        Open01: Distribution<T>,
    {
        self.build(target).run()
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new(ProposalKind::default(), 100_000)
    }
}
