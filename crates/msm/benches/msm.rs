use ark_ec::{scalar_mul::variable_base::VariableBaseMSM, short_weierstrass::Projective};
use ark_ff::UniformRand;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pairing_msm::{bls12_381, bn254, msm_with_config, MsmConfig};
use std::hint::black_box;

const RNG_SEED: u64 = 42;
const MSM_SIZES: [usize; 4] = [1 << 4, 1 << 8, 1 << 12, 1 << 16];

fn random_elements<T: UniformRand>(n: usize, rng: &mut StdRng) -> Vec<T> {
    (0..n).map(|_| T::rand(rng)).collect()
}

pub fn bench_bn254_g1(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let max = MSM_SIZES[MSM_SIZES.len() - 1];
    let points: Vec<ark_bn254::G1Affine> = random_elements(max, &mut rng);
    let scalars: Vec<ark_bn254::Fr> = random_elements(max, &mut rng);

    let mut group = c.benchmark_group("bn254 g1 msm");
    for size in MSM_SIZES {
        let (points, scalars) = (&points[..size], &scalars[..size]);
        group.bench_with_input(BenchmarkId::new("batch affine", size), &size, |b, _| {
            b.iter(|| bn254::g1_msm(black_box(points), black_box(scalars)))
        });
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            let config = MsmConfig::new().sequential();
            b.iter(|| msm_with_config(black_box(points), black_box(scalars), &config))
        });
        group.bench_with_input(BenchmarkId::new("arkworks", size), &size, |b, _| {
            b.iter(|| {
                Projective::<ark_bn254::g1::Config>::msm(black_box(points), black_box(scalars))
            })
        });
    }
    group.finish();
}

pub fn bench_bls12_381(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let size = 1 << 12;
    let g1: Vec<ark_bls12_381::G1Affine> = random_elements(size, &mut rng);
    let g2: Vec<ark_bls12_381::G2Affine> = random_elements(size, &mut rng);
    let scalars: Vec<ark_bls12_381::Fr> = random_elements(size, &mut rng);

    let mut group = c.benchmark_group("bls12-381 msm");
    group.bench_function(format!("g1 msm (size {size})"), |b| {
        b.iter(|| bls12_381::g1_msm(black_box(&g1), black_box(&scalars)))
    });
    group.bench_function(format!("g2 msm (size {size})"), |b| {
        b.iter(|| bls12_381::g2_msm(black_box(&g2), black_box(&scalars)))
    });
    group.finish();
}

criterion_group!(benches, bench_bn254_g1, bench_bls12_381);
criterion_main!(benches);
