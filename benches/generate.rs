//! Benchmarks for shape generation and the per-frame step.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use pointmorph::engine::MorphEngine;
use pointmorph::shapes::{generate_positions_with, ShapeKind};

/// The interactive default; every generator must stay comfortably inside a
/// frame budget at this count.
const PARTICLE_COUNT: usize = 30_000;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for shape in ShapeKind::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(shape.label()),
            &shape,
            |b, &shape| {
                let mut rng = SmallRng::seed_from_u64(1);
                b.iter(|| black_box(generate_positions_with(shape, PARTICLE_COUNT, &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    group.bench_function("mid_morph", |b| {
        let mut engine =
            MorphEngine::with_rng(PARTICLE_COUNT, SmallRng::seed_from_u64(2)).unwrap();
        engine.set_shape(ShapeKind::Butterfly);

        let mut elapsed = 0.0f32;
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            engine.step(black_box(elapsed));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_step);
criterion_main!(benches);
