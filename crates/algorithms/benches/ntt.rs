use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use latkem_algorithms::ntt::NttEngine;
use latkem_algorithms::poly::Poly;
use latkem_params::{RING_N, RING_Q};

fn random_poly(rng: &mut ChaCha20Rng) -> Poly {
    let coeffs: Vec<u32> = (0..RING_N).map(|_| rng.gen_range(0..RING_Q)).collect();
    Poly::from_coeffs(&coeffs).unwrap()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("ntt_engine");
    let engine = NttEngine::new(128, RING_Q).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let data: Vec<u32> = (0..128).map(|_| rng.gen_range(0..RING_Q)).collect();

    group.bench_function("forward_128", |b| {
        b.iter(|| {
            let mut a = data.clone();
            engine.forward(black_box(&mut a)).unwrap();
            a
        })
    });

    group.bench_function("inverse_128", |b| {
        let mut transformed = data.clone();
        engine.forward(&mut transformed).unwrap();
        b.iter(|| {
            let mut a = transformed.clone();
            engine.inverse(black_box(&mut a)).unwrap();
            a
        })
    });

    group.finish();
}

fn bench_ring_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_mul");
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let p = random_poly(&mut rng);
    let g = random_poly(&mut rng);

    group.bench_function("split_transform", |b| {
        b.iter(|| black_box(&p).ring_mul(black_box(&g)).unwrap())
    });

    let p_hat = p.ntt().unwrap();
    let g_hat = g.ntt().unwrap();
    group.bench_function("pointwise_only", |b| {
        b.iter(|| black_box(&p_hat).pointwise_mul(black_box(&g_hat)))
    });

    group.finish();
}

criterion_group!(benches, bench_engine, bench_ring_mul);
criterion_main!(benches);
