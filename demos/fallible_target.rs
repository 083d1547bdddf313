//! A target density that can fail. The first failure stops the run and reaches the caller
//! with the original error attached.

use std::error::Error;

use mini_mh::distributions::{Fallible, ProposalKind};
use mini_mh::error::MhError;
use mini_mh::metropolis_hastings::MhSampler;

fn main() {
    // Laplace density, refusing to evaluate far out in the tails.
    let target = Fallible(|x: f64| {
        if x.abs() > 3.0 {
            Err(format!("refusing to evaluate the density at {x:.3}"))
        } else {
            Ok((-x.abs()).exp())
        }
    });

    let mut mh = MhSampler::new(1_000_000, target, ProposalKind::RandomWalk).set_seed(1);
    match mh.run() {
        Ok(samples) => println!("Finished with {} samples", samples.len()),
        Err(err @ MhError::Target(_)) => {
            println!("Stopped: {err}");
            if let Some(source) = err.source() {
                println!("Caused by: {source}");
            }
            println!("Chain stopped at {:.3} after {} steps", mh.current_state(), mh.stats().n);
        }
        Err(err) => println!("Unexpected error: {err}"),
    }
}
