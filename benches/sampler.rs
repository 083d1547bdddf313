use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mini_mh::distributions::{BetaKernel, ProposalKind};
use mini_mh::metropolis_hastings::MhSampler;

fn run_beta(kind: ProposalKind, n: usize) -> Vec<f64> {
    MhSampler::new(n, BetaKernel::new(2.6, 6.3), kind)
        .set_seed(42)
        .run()
        .unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    for kind in ProposalKind::ALL {
        c.bench_function(&format!("beta {kind} 10000"), |b| {
            b.iter(|| run_beta(black_box(kind), black_box(10_000)))
        });
    }

    c.bench_function("beta generic 100000", |b| {
        b.iter(|| run_beta(black_box(ProposalKind::Generic), black_box(100_000)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
