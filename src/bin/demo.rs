//! Samples an unnormalized Beta(2.6, 6.3) density with Metropolis-Hastings and prints a
//! summary of the run.
//!
//! Usage: `demo [generic|independent|random-walk] [n_samples]`

use std::error::Error;
use std::time::Instant;

use mini_mh::config::SamplerConfig;
use mini_mh::distributions::{BetaKernel, ProposalKind};
use mini_mh::stats::histogram;

#[cfg(feature = "csv")]
use mini_mh::io::csv::save_csv;

const A: f64 = 2.6;
const B: f64 = 6.3;

/// Runs the sampler and prints a summary. Returns the samples for inspection.
fn run(kind: ProposalKind, n_samples: usize) -> Result<Vec<f64>, Box<dyn Error>> {
    let config = SamplerConfig::new(kind, n_samples);
    let mut sampler = config.build(BetaKernel::new(A, B));

    let start = Instant::now();
    let samples = sampler.run_progress()?;
    let elapsed = start.elapsed();

    let stats = sampler.stats();
    println!("Proposal: {kind}");
    println!("Generated {} samples in {:.3?}", samples.len(), elapsed);
    println!("Acceptance rate: {:.3}", stats.acceptance_rate);
    println!(
        "Mean: {:.4} (Beta({A}, {B}) mean: {:.4})",
        stats.mean,
        A / (A + B)
    );
    println!("Variance: {:.5}", stats.variance);

    if !samples.is_empty() {
        let hist = histogram(&samples, 0.0, 1.0, 10)?;
        println!("Histogram on [0, 1):");
        for (i, p) in hist.iter().enumerate() {
            let bar = "#".repeat((p * 200.0).round() as usize);
            println!("  [{:.1}, {:.1}) {:>6.3} {bar}", i as f64 / 10.0, (i + 1) as f64 / 10.0, p);
        }
    }

    #[cfg(feature = "csv")]
    {
        save_csv(&samples, "samples.csv")?;
        println!("Saved samples to samples.csv");
    }

    Ok(samples)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next() {
        Some(name) => name.parse()?,
        None => ProposalKind::Generic,
    };
    let n_samples = match args.next() {
        Some(n) => n.parse()?,
        None => 100_000,
    };
    run(kind, n_samples)?;
    Ok(())
}

#[test]
fn test_run() {
    let samples = run(ProposalKind::Generic, 2_000).expect("Expected the demo run to succeed.");
    assert_eq!(samples.len(), 2_000);
    assert!(samples.iter().all(|&x| x > 0.0 && x < 1.0));
}
