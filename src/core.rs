//! The Markov chain abstraction and the loops that drive a chain for a fixed number of steps.

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::MhError;

pub trait MarkovChain<T> {
    /// Does one iteration of the chain, returning the state after the step.
    fn step(&mut self) -> Result<T, MhError>;

    /// Returns the current state without stepping.
    fn current_state(&self) -> T;
}

/// Runs `chain` for exactly `n_steps` iterations and records the state after every step,
/// whether or not the step moved the chain. The first error ends the run.
pub fn run_chain<T, M>(chain: &mut M, n_steps: usize) -> Result<Vec<T>, MhError>
where
    M: MarkovChain<T>,
{
    let mut out = Vec::with_capacity(n_steps);
    for _ in 0..n_steps {
        out.push(chain.step()?);
    }
    Ok(out)
}

pub fn run_chain_with_progress<T, M>(
    chain: &mut M,
    n_steps: usize,
    pb: &ProgressBar,
) -> Result<Vec<T>, MhError>
where
    M: MarkovChain<T>,
{
    let mut out = Vec::with_capacity(n_steps);
    pb.set_length(n_steps as u64);

    for _ in 0..n_steps {
        match chain.step() {
            Ok(state) => out.push(state),
            Err(err) => {
                pb.abandon_with_message("Failed");
                return Err(err);
            }
        }
        pb.inc(1);
    }

    Ok(out)
}

/// The bar style used by [`MhSampler::run_progress`](crate::metropolis_hastings::MhSampler::run_progress).
pub fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts up by one per step and fails once it reaches `fail_at`.
    struct Counter {
        state: usize,
        fail_at: Option<usize>,
    }

    impl MarkovChain<usize> for Counter {
        fn step(&mut self) -> Result<usize, MhError> {
            if Some(self.state) == self.fail_at {
                return Err(MhError::NanDensity { x: self.state as f64 });
            }
            self.state += 1;
            Ok(self.state)
        }

        fn current_state(&self) -> usize {
            self.state
        }
    }

    #[test]
    fn run_chain_records_every_step() {
        let mut chain = Counter {
            state: 0,
            fail_at: None,
        };
        let out = run_chain(&mut chain, 5).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
        assert_eq!(chain.current_state(), 5);
    }

    #[test]
    fn run_chain_zero_steps() {
        let mut chain = Counter {
            state: 3,
            fail_at: None,
        };
        let out = run_chain(&mut chain, 0).unwrap();
        assert!(out.is_empty());
        assert_eq!(chain.current_state(), 3);
    }

    #[test]
    fn run_chain_stops_at_first_error() {
        let mut chain = Counter {
            state: 0,
            fail_at: Some(2),
        };
        let res = run_chain(&mut chain, 10);
        assert!(matches!(res, Err(MhError::NanDensity { .. })));
        assert_eq!(chain.current_state(), 2);
    }

    #[test]
    fn progress_bar_tracks_steps() {
        let mut chain = Counter {
            state: 0,
            fail_at: None,
        };
        let pb = ProgressBar::hidden();
        let out = run_chain_with_progress(&mut chain, 7, &pb).unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(pb.position(), 7);
        assert_eq!(pb.length(), Some(7));
    }

    #[test]
    fn progress_bar_run_propagates_errors() {
        let mut chain = Counter {
            state: 0,
            fail_at: Some(3),
        };
        let pb = ProgressBar::hidden();
        let res = run_chain_with_progress(&mut chain, 7, &pb);
        assert!(res.is_err());
        assert_eq!(pb.position(), 3);
    }
}
