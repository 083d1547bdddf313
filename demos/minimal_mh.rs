use mini_mh::config::SamplerConfig;
use mini_mh::distributions::ProposalKind;

fn main() {
    // Unnormalized standard normal density.
    let target = |x: f64| (-0.5 * x * x).exp();

    // 10,000 samples with the large-step random walk.
    let samples = SamplerConfig::new(ProposalKind::RandomWalk, 10_000)
        .run(target)
        .expect("Expected sampling to succeed");

    assert_eq!(samples.len(), 10_000);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    println!("Sample mean: {mean:.3}");
}
