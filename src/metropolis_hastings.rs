/*!
# Metropolis–Hastings Sampler

A one-dimensional Metropolis–Hastings sampler for densities known up to a constant factor.

Every iteration proposes a candidate from the current state, computes the acceptance ratio
`f(candidate) / f(current)` and moves to the candidate when a uniform draw `u` satisfies
`u < ratio`. The state after the iteration is recorded whether or not the chain moved, so a
run of `N` iterations yields exactly `N` samples.

Each sampler owns its state and its random source. [`MhSampler::new`] seeds a
[`SmallRng`] from the thread RNG; [`MhSampler::set_seed`] makes a run reproducible and
[`MhSampler::from_rng`] accepts any other random source. Seed once per independent chain and
never share a random source between chains running on different threads.

## Example Usage

```rust
use mini_mh::distributions::{BetaKernel, ProposalKind};
use mini_mh::metropolis_hastings::MhSampler;

let target = BetaKernel::new(2.6, 6.3);
let mut sampler = MhSampler::new(1_000, target, ProposalKind::Generic).set_seed(42);
let samples: Vec<f64> = sampler.run().unwrap();

assert_eq!(samples.len(), 1_000);
assert_eq!(samples[samples.len() - 1], sampler.current_state());
assert!(samples.iter().all(|&x| x > 0.0 && x < 1.0));
```
*/

use indicatif::ProgressBar;
use num_traits::Float;
use rand::prelude::*;
use rand_distr::{Open01, Standard};

use crate::core::{progress_style, run_chain, run_chain_with_progress, MarkovChain};
use crate::distributions::{Proposal, Target};
use crate::error::MhError;
use crate::stats::{ChainStats, ChainTracker};

/// What to do when the current state has zero density but the candidate does not.
///
/// The ratio `f(candidate) / 0` is `+inf` in that case. A zero-density state is only
/// reachable when the target vanishes somewhere the chain can start, so this is a caller
/// error; the policy decides how loudly it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroDensityPolicy {
    /// Treat the ratio as `+inf` and always move to the candidate.
    #[default]
    AcceptCandidate,
    /// Stop the run with [`MhError::ZeroCurrentDensity`].
    Fail,
}

/**
Computes the acceptance ratio `numerator / denominator`.

`numerator` is the density at the candidate, `denominator` the density at the current state.

# Errors

- a negative or NaN density gives [`MhError::NegativeDensity`] or [`MhError::NanDensity`],
- `0 / 0` and `inf / inf` give [`MhError::IndeterminateRatio`],
- `positive / 0` gives `+inf` under [`ZeroDensityPolicy::AcceptCandidate`] and
  [`MhError::ZeroCurrentDensity`] under [`ZeroDensityPolicy::Fail`].

# Examples

```rust
use mini_mh::metropolis_hastings::{acceptance_ratio, ZeroDensityPolicy};

let policy = ZeroDensityPolicy::AcceptCandidate;
assert_eq!(acceptance_ratio(0.5, 0.25, 0.0, 1.0, policy).unwrap(), 2.0);
assert_eq!(acceptance_ratio(1.0, 0.0, 0.0, 1.0, policy).unwrap(), f64::INFINITY);
assert!(acceptance_ratio(0.0, 0.0, 0.0, 1.0, policy).is_err());
```
*/
pub fn acceptance_ratio<T: Float>(
    numerator: T,
    denominator: T,
    current: T,
    candidate: T,
    policy: ZeroDensityPolicy,
) -> Result<T, MhError> {
    check_density(candidate, numerator)?;
    check_density(current, denominator)?;

    let indeterminate = || MhError::IndeterminateRatio {
        current: as_f64(current),
        candidate: as_f64(candidate),
    };

    if denominator.is_zero() {
        if numerator.is_zero() {
            return Err(indeterminate());
        }
        return match policy {
            ZeroDensityPolicy::AcceptCandidate => Ok(T::infinity()),
            ZeroDensityPolicy::Fail => Err(MhError::ZeroCurrentDensity {
                current: as_f64(current),
                candidate: as_f64(candidate),
            }),
        };
    }

    let ratio = numerator / denominator;
    if ratio.is_nan() {
        return Err(indeterminate());
    }
    Ok(ratio)
}

fn check_density<T: Float>(x: T, value: T) -> Result<(), MhError> {
    if value.is_nan() {
        return Err(MhError::NanDensity { x: as_f64(x) });
    }
    if value < T::zero() {
        return Err(MhError::NegativeDensity {
            x: as_f64(x),
            value: as_f64(value),
        });
    }
    Ok(())
}

fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/**
A single Metropolis–Hastings chain over the real line.

# Type Parameters
- `T`: The floating-point type of the state (`f64` or `f32`).
- `D`: The target density. Must implement [`Target`].
- `Q`: The proposal strategy. Must implement [`Proposal`].
- `R`: The random source, [`SmallRng`] unless injected with [`MhSampler::from_rng`].
*/
#[derive(Debug, Clone)]
pub struct MhSampler<T, D, Q, R = SmallRng> {
    /// The target density we want to sample from.
    pub target: D,
    /// The proposal strategy, fixed for the lifetime of the sampler.
    pub proposal: Q,
    /// Number of samples produced by one call to [`run`](MhSampler::run).
    pub n_samples: usize,
    seed: Option<u64>,
    pub zero_density: ZeroDensityPolicy,
    current_state: T,
    rng: R,
    tracker: ChainTracker,
}

impl<T, D, Q> MhSampler<T, D, Q, SmallRng>
where
    T: Float,
    D: Target<T>,
    Q: Proposal<T>,
    Standard: Distribution<T>,
    Open01: Distribution<T>,
{
    /**
    Creates a sampler producing `n_samples` samples per run. The random source is seeded
    from the thread RNG and the initial state is drawn uniformly from `(0, 1)`.

    # Examples

    ```rust
    use mini_mh::distributions::ProposalKind;
    use mini_mh::metropolis_hastings::MhSampler;

    let sampler = MhSampler::new(10, |_x: f64| 1.0, ProposalKind::RandomWalk);
    let x = sampler.current_state();
    assert!(x > 0.0 && x < 1.0);
    ```
    */
    pub fn new(n_samples: usize, target: D, proposal: Q) -> Self {
        let seed = thread_rng().gen::<u64>();
        let mut sampler = Self::from_rng(n_samples, target, proposal, SmallRng::seed_from_u64(seed));
        sampler.seed = Some(seed);
        sampler
    }

    /**
    Reseeds the random source and redraws the initial state from it.

    # Examples

    ```rust
    use mini_mh::distributions::ProposalKind;
    use mini_mh::metropolis_hastings::MhSampler;

    let density = |x: f64| (-x * x / 2.0).exp();
    let mut a = MhSampler::new(100, density, ProposalKind::Generic).set_seed(7);
    let mut b = MhSampler::new(100, density, ProposalKind::Generic).set_seed(7);
    assert_eq!(a.seed(), Some(7));
    assert_eq!(a.run().unwrap(), b.run().unwrap());
    ```
    */
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = SmallRng::seed_from_u64(seed);
        self.current_state = self.rng.sample(Open01);
        self
    }
}

impl<T, D, Q, R> MhSampler<T, D, Q, R>
where
    T: Float,
    D: Target<T>,
    Q: Proposal<T>,
    R: Rng,
    Standard: Distribution<T>,
    Open01: Distribution<T>,
{
    /// Seed of the random source, if the sampler seeded it itself. Only
    /// [`set_seed`](MhSampler::set_seed) changes it.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Creates a sampler that draws all its randomness, including the initial state, from
    /// `rng`.
    pub fn from_rng(n_samples: usize, target: D, proposal: Q, mut rng: R) -> Self {
        let current_state = rng.sample(Open01);
        Self {
            target,
            proposal,
            n_samples,
            seed: None,
            zero_density: ZeroDensityPolicy::default(),
            current_state,
            rng,
            tracker: ChainTracker::new(),
        }
    }

    pub fn with_zero_density_policy(mut self, policy: ZeroDensityPolicy) -> Self {
        self.zero_density = policy;
        self
    }

    /**
    Runs the chain for `n_samples` iterations and returns the state after every iteration.

    Calling `run` again continues the chain from where the previous run stopped.

    # Errors

    Fails on the first iteration whose acceptance ratio cannot be formed (see
    [`acceptance_ratio`]) or whose density evaluation fails ([`MhError::Target`]).
    */
    pub fn run(&mut self) -> Result<Vec<T>, MhError> {
        let n = self.n_samples;
        run_chain(self, n)
    }

    /// Same as [`run`](MhSampler::run), reporting progress on a terminal progress bar.
    pub fn run_progress(&mut self) -> Result<Vec<T>, MhError> {
        let n = self.n_samples;
        let pb = ProgressBar::new(n as u64);
        pb.set_prefix("Chain");
        pb.set_style(progress_style());
        let samples = run_chain_with_progress(self, n, &pb)?;
        pb.finish_with_message("Done!");
        Ok(samples)
    }

    /// Acceptance counts and running moments of everything this sampler has recorded.
    pub fn stats(&self) -> ChainStats {
        self.tracker.stats()
    }

    fn density(&self, x: T) -> Result<T, MhError> {
        self.target.unnorm_density(x).map_err(MhError::Target)
    }
}

impl<T, D, Q, R> MhSampler<T, D, Q, R>
where
    T: Copy,
{
    pub fn current_state(&self) -> T {
        self.current_state
    }
}

impl<T, D, Q, R> MarkovChain<T> for MhSampler<T, D, Q, R>
where
    T: Float,
    D: Target<T>,
    Q: Proposal<T>,
    R: Rng,
    Standard: Distribution<T>,
    Open01: Distribution<T>,
{
    /// Performs one Metropolis–Hastings update and returns the resulting state.
    ///
    /// Draws exactly two uniforms per call: one for the proposal, then one for the
    /// acceptance test.
    fn step(&mut self) -> Result<T, MhError> {
        let current = self.current_state;
        let candidate = self.proposal.sample(current, &mut self.rng);
        let ratio = acceptance_ratio(
            self.density(candidate)?,
            self.density(current)?,
            current,
            candidate,
            self.zero_density,
        )?;
        let u: T = self.rng.gen();
        let accepted = u < ratio;
        if accepted {
            self.current_state = candidate;
        }
        self.tracker.step(self.current_state, accepted);
        Ok(self.current_state)
    }

    fn current_state(&self) -> T {
        self.current_state
    }
}
