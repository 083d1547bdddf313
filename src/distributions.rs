/*!
Target densities and proposal strategies for the one-dimensional Metropolis–Hastings sampler.

A target only has to be known up to a constant factor: the sampler never looks at anything
but the ratio of two density values. Any closure `Fn(T) -> T` is a [`Target`]; closures that
can fail are wrapped in [`Fallible`] so that their errors reach the caller of
[`run`](crate::metropolis_hastings::MhSampler::run) unchanged.

Proposals are stateless. A [`Proposal`] maps the current state and a single uniform draw
`u` in `[0, 1)` to a candidate; the sampler owns the random source and supplies `u`.

# Examples

```rust
use mini_mh::distributions::{BetaKernel, Proposal, ProposalKind, Target};

let kernel = BetaKernel::new(2.6, 6.3);
let density = kernel.unnorm_density(0.25).unwrap();
assert!(density > 0.0);

// Same draw, different states: the independent proposal ignores the state.
assert_eq!(ProposalKind::Independent.propose(0.3, 0.9), ProposalKind::Independent.propose(7.0, 0.9));
assert_eq!(ProposalKind::RandomWalk.propose(1.0, 0.75), 1.25);
```
*/

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use rand::Rng;
use rand_distr::{Distribution, Standard};

use crate::error::{BoxError, MhError};

/// A (possibly unnormalized) density on the real line.
pub trait Target<T> {
    /// Evaluates the density at `x`. Values must be non-negative.
    fn unnorm_density(&self, x: T) -> Result<T, BoxError>;
}

impl<T, F> Target<T> for F
where
    F: Fn(T) -> T,
{
    fn unnorm_density(&self, x: T) -> Result<T, BoxError> {
        Ok(self(x))
    }
}

/// Adapts a closure returning `Result` into a [`Target`] whose errors propagate.
///
/// ```rust
/// use mini_mh::distributions::{Fallible, Target};
///
/// let target = Fallible(|x: f64| if x < 10.0 { Ok(1.0) } else { Err("out of range") });
/// assert!(target.unnorm_density(1.0).is_ok());
/// assert!(target.unnorm_density(11.0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<T, F, E> Target<T> for Fallible<F>
where
    F: Fn(T) -> Result<T, E>,
    E: Into<BoxError>,
{
    fn unnorm_density(&self, x: T) -> Result<T, BoxError> {
        (self.0)(x).map_err(Into::into)
    }
}

/// A trait for distributions with a known normalizing constant, used to compare samples
/// against the exact shape of the target.
pub trait Normalized<T> {
    /// Normalized density at `x`.
    fn pdf(&self, x: T) -> T;

    /// Cumulative distribution function at `x`.
    fn cdf(&self, x: T) -> T;
}

/// A strategy that turns the current state into a candidate state.
pub trait Proposal<T> {
    /// Computes the candidate from the current state and one uniform draw `u` in `[0, 1)`.
    fn propose(&self, current: T, u: T) -> T;

    /// Draws `u` from `rng` and proposes a candidate.
    fn sample<R: Rng + ?Sized>(&self, current: T, rng: &mut R) -> T
    where
        Standard: Distribution<T>,
    {
        let u: T = rng.gen();
        self.propose(current, u)
    }
}

/// The proposal strategies the sampler can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProposalKind {
    /// Local random walk with steps uniform on `(-0.25, 0.25)`.
    #[default]
    Generic,
    /// Independence sampler: candidates uniform on `(-0.25, 0.25)` whatever the state.
    Independent,
    /// Random walk with steps uniform on `(-0.5, 0.5)`.
    RandomWalk,
}

impl ProposalKind {
    pub const ALL: [ProposalKind; 3] = [
        ProposalKind::Generic,
        ProposalKind::Independent,
        ProposalKind::RandomWalk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProposalKind::Generic => "generic",
            ProposalKind::Independent => "independent",
            ProposalKind::RandomWalk => "random-walk",
        }
    }
}

impl<T: Float> Proposal<T> for ProposalKind {
    fn propose(&self, current: T, u: T) -> T {
        let half = half::<T>();
        match self {
            ProposalKind::Generic => current + half * (u - half),
            ProposalKind::Independent => half * (u - half),
            ProposalKind::RandomWalk => current + (u - half),
        }
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProposalKind {
    type Err = MhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(ProposalKind::Generic),
            "independent" => Ok(ProposalKind::Independent),
            "random-walk" | "random_walk" | "randomwalk" => Ok(ProposalKind::RandomWalk),
            _ => Err(MhError::UnknownProposal(s.to_string())),
        }
    }
}

/**
The unnormalized Beta density `x^(a-1) (1-x)^(b-1)` on the open interval `(0, 1)`, zero
elsewhere.

# Examples

```rust
use mini_mh::distributions::{BetaKernel, Target};

let kernel = BetaKernel::new(2.0, 2.0);
assert_eq!(kernel.unnorm_density(0.5).unwrap(), 0.25);
assert_eq!(kernel.unnorm_density(-0.1).unwrap(), 0.0);
```
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaKernel<T: Float> {
    pub a: T,
    pub b: T,
}

impl<T: Float> BetaKernel<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    fn eval(&self, x: T) -> T {
        if x > T::zero() && x < T::one() {
            x.powf(self.a - T::one()) * (T::one() - x).powf(self.b - T::one())
        } else {
            T::zero()
        }
    }
}

impl<T: Float> Target<T> for BetaKernel<T> {
    fn unnorm_density(&self, x: T) -> Result<T, BoxError> {
        Ok(self.eval(x))
    }
}

/**
The triangular distribution on `[lower, upper]` with its peak at `mode`.

Requires `lower <= mode <= upper` and `lower < upper`.

# Examples

```rust
use mini_mh::distributions::{Normalized, Triangular};

let tri = Triangular::new(-1.0, 0.0, 1.0);
assert_eq!(tri.pdf(0.0), 1.0);
assert_eq!(tri.cdf(0.0), 0.5);
assert_eq!(tri.cdf(2.0), 1.0);
```
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangular<T: Float> {
    pub lower: T,
    pub mode: T,
    pub upper: T,
}

impl<T: Float> Triangular<T> {
    pub fn new(lower: T, mode: T, upper: T) -> Self {
        Self { lower, mode, upper }
    }

    fn width(&self) -> T {
        self.upper - self.lower
    }
}

impl<T: Float> Normalized<T> for Triangular<T> {
    fn pdf(&self, x: T) -> T {
        let two = T::one() + T::one();
        if x < self.lower || x > self.upper {
            T::zero()
        } else if x < self.mode {
            two * (x - self.lower) / (self.width() * (self.mode - self.lower))
        } else if x > self.mode {
            two * (self.upper - x) / (self.width() * (self.upper - self.mode))
        } else {
            two / self.width()
        }
    }

    fn cdf(&self, x: T) -> T {
        if x <= self.lower {
            T::zero()
        } else if x <= self.mode {
            (x - self.lower).powi(2) / (self.width() * (self.mode - self.lower))
        } else if x < self.upper {
            T::one() - (self.upper - x).powi(2) / (self.width() * (self.upper - self.mode))
        } else {
            T::one()
        }
    }
}

impl<T: Float> Target<T> for Triangular<T> {
    fn unnorm_density(&self, x: T) -> Result<T, BoxError> {
        Ok(self.pdf(x))
    }
}

fn half<T: Float>() -> T {
    T::one() / (T::one() + T::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn generic_steps_stay_within_a_quarter() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let candidate: f64 = ProposalKind::Generic.sample(3.0, &mut rng);
            assert!(
                (candidate - 3.0).abs() <= 0.25,
                "Expected a step of at most 0.25, got {}",
                candidate - 3.0
            );
        }
    }

    #[test]
    fn random_walk_steps_stay_within_a_half() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut max_step: f64 = 0.0;
        for _ in 0..10_000 {
            let candidate: f64 = ProposalKind::RandomWalk.sample(-2.0, &mut rng);
            max_step = max_step.max((candidate + 2.0).abs());
        }
        assert!(max_step <= 0.5, "Step {max_step} exceeds 0.5");
        // Generic never gets beyond 0.25, the random walk routinely does.
        assert!(max_step > 0.4, "Expected steps near 0.5, largest was {max_step}");
    }

    #[test]
    fn proposal_formulas() {
        assert_abs_diff_eq!(ProposalKind::Generic.propose(1.0, 0.9), 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(ProposalKind::Generic.propose(1.0, 0.0), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(ProposalKind::RandomWalk.propose(1.0, 0.9), 1.4, epsilon = 1e-12);
        assert_abs_diff_eq!(ProposalKind::RandomWalk.propose(1.0, 0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ProposalKind::Independent.propose(1.0, 0.9), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn independent_proposal_ignores_the_current_state() {
        for &u in &[0.0, 0.1, 0.5, 0.77, 0.999] {
            let expected = 0.5 * (u - 0.5);
            for &x in &[-100.0, -1.0, 0.0, 0.3, 42.0] {
                let candidate: f64 = ProposalKind::Independent.propose(x, u);
                assert_eq!(
                    candidate, expected,
                    "Independent proposal depends on the current state {x} for u = {u}"
                );
            }
        }
    }

    #[test]
    fn generic_proposal_is_an_offset_of_the_state() {
        let u = 0.8;
        let base: f64 = ProposalKind::Generic.propose(0.0, u);
        for &x in &[-3.0, 0.5, 10.0] {
            assert_abs_diff_eq!(ProposalKind::Generic.propose(x, u) - x, base, epsilon = 1e-12);
        }
    }

    #[test]
    fn proposals_work_in_single_precision() {
        let candidate: f32 = ProposalKind::Generic.propose(1.0f32, 0.5);
        assert_eq!(candidate, 1.0);
    }

    #[test]
    fn parse_proposal_kind() {
        assert_eq!("generic".parse::<ProposalKind>().unwrap(), ProposalKind::Generic);
        assert_eq!(
            " Independent ".parse::<ProposalKind>().unwrap(),
            ProposalKind::Independent
        );
        assert_eq!(
            "random_walk".parse::<ProposalKind>().unwrap(),
            ProposalKind::RandomWalk
        );
        for kind in ProposalKind::ALL {
            assert_eq!(kind.to_string().parse::<ProposalKind>().unwrap(), kind);
        }
        let err = "metropolis".parse::<ProposalKind>().unwrap_err();
        assert!(matches!(err, MhError::UnknownProposal(ref s) if s == "metropolis"));
    }

    #[test]
    fn beta_kernel_values() {
        let kernel = BetaKernel::new(2.6, 6.3);
        let x: f64 = 0.3;
        let expected = x.powf(1.6) * (0.7f64).powf(5.3);
        assert_abs_diff_eq!(kernel.unnorm_density(x).unwrap(), expected, epsilon = 1e-15);
        assert_eq!(kernel.unnorm_density(0.0).unwrap(), 0.0);
        assert_eq!(kernel.unnorm_density(1.0).unwrap(), 0.0);
        assert_eq!(kernel.unnorm_density(1.5).unwrap(), 0.0);
    }

    #[test]
    fn triangular_pdf_integrates_to_its_cdf() {
        let tri = Triangular::new(-1.0, 0.25, 2.0);
        let n = 20_000;
        let dx = 3.0 / n as f64;
        let integral: f64 = (0..n)
            .map(|i| tri.pdf(-1.0 + (i as f64 + 0.5) * dx) * dx)
            .sum();
        assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(tri.cdf(0.25), 1.25 / 3.0, epsilon = 1e-12);
        assert_eq!(tri.cdf(-5.0), 0.0);
        assert_eq!(tri.cdf(2.0), 1.0);
    }

    #[test]
    fn triangular_with_mode_at_the_edge() {
        let tri = Triangular::new(0.0, 0.0, 1.0);
        assert_eq!(tri.pdf(0.0), 2.0);
        assert_eq!(tri.cdf(0.0), 0.0);
        assert_abs_diff_eq!(tri.cdf(0.5), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn closures_and_fallible_closures_are_targets() {
        let flat = |_x: f64| 1.0;
        assert_eq!(flat.unnorm_density(3.0).unwrap(), 1.0);

        let failing = Fallible(|x: f64| -> Result<f64, std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, format!("no density at {x}")))
        });
        let err = failing.unnorm_density(0.5).unwrap_err();
        assert_eq!(err.to_string(), "no density at 0.5");
    }
}
