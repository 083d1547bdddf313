//! Running statistics for a chain and helpers for comparing samples with a normalized density.

use ndarray::prelude::*;
use ndarray_stats::DeviationExt;
use num_traits::{Float, ToPrimitive};

use crate::distributions::Normalized;
use crate::error::StatsError;

/// Tracks acceptance counts and the running mean and variance of the recorded states.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainTracker {
    n: u64,
    n_accepted: u64,
    mean: f64,
    // Sum of squared deviations from the running mean (Welford).
    m2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    /// Number of proposals processed.
    pub n: u64,
    pub n_accepted: u64,
    pub acceptance_rate: f64,
    pub mean: f64,
    /// Sample variance (n - 1 denominator); NaN until two states have been recorded.
    pub variance: f64,
}

impl ChainTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step<T: ToPrimitive>(&mut self, x: T, accepted: bool) {
        self.n += 1;
        if accepted {
            self.n_accepted += 1;
        }
        let x = x.to_f64().unwrap_or(f64::NAN);
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.n_accepted as f64 / self.n as f64
        }
    }

    pub fn variance(&self) -> f64 {
        if self.n < 2 {
            f64::NAN
        } else {
            self.m2 / (self.n - 1) as f64
        }
    }

    pub fn stats(&self) -> ChainStats {
        ChainStats {
            n: self.n,
            n_accepted: self.n_accepted,
            acceptance_rate: self.acceptance_rate(),
            mean: self.mean,
            variance: self.variance(),
        }
    }
}

fn check_range(lower: f64, upper: f64, n_bins: usize) -> Result<(), StatsError> {
    if n_bins == 0 {
        return Err(StatsError::ZeroBins);
    }
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(StatsError::InvalidRange { lower, upper });
    }
    Ok(())
}

/// Fraction of `samples` in each of `n_bins` equal-width bins on `[lower, upper)`.
///
/// Samples outside the range are not counted in any bin but still count towards the total,
/// so the result sums to the fraction of samples inside the range.
pub fn histogram<T: ToPrimitive>(
    samples: &[T],
    lower: f64,
    upper: f64,
    n_bins: usize,
) -> Result<Array1<f64>, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySample);
    }
    check_range(lower, upper, n_bins)?;

    let width = (upper - lower) / n_bins as f64;
    let mut counts = Array1::<f64>::zeros(n_bins);
    for x in samples.iter().filter_map(|x| x.to_f64()) {
        if x >= lower && x < upper {
            let bin = (((x - lower) / width) as usize).min(n_bins - 1);
            counts[bin] += 1.0;
        }
    }
    Ok(counts / samples.len() as f64)
}

/// Exact probability mass of each histogram bin under a normalized distribution.
pub fn bin_probabilities<T, D>(
    dist: &D,
    lower: f64,
    upper: f64,
    n_bins: usize,
) -> Result<Array1<f64>, StatsError>
where
    T: Float,
    D: Normalized<T>,
{
    check_range(lower, upper, n_bins)?;
    let edges = Array1::linspace(lower, upper, n_bins + 1);
    let cdf = edges.mapv(|e| {
        T::from(e)
            .map(|e| dist.cdf(e))
            .and_then(|p| p.to_f64())
            .unwrap_or(f64::NAN)
    });
    Ok(&cdf.slice(s![1..]) - &cdf.slice(s![..-1]))
}

/// Total variation distance `0.5 * sum |p_i - q_i|` between two discrete distributions.
pub fn total_variation(p: &Array1<f64>, q: &Array1<f64>) -> Result<f64, StatsError> {
    Ok(0.5 * p.l1_dist(q)?)
}
