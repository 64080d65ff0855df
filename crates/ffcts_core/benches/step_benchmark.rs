//! Simulation step throughput.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ffcts_core::{seeded_rng, MotionContext, Particle, ParticleField, SimulationConfig};

fn populated(count: usize) -> ParticleField {
    let mut field = ParticleField::with_capacity(count);
    field.extend((0..count).map(|i| {
        let t = i as f32 / count as f32;
        Particle::new([t * 2.0 - 1.0, 0.0], [0.001, -0.001]).with_fade_speed(0.0)
    }));
    field
}

fn bench_step(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut group = c.benchmark_group("field_step");

    for count in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut field = populated(count);
            let mut rng = seeded_rng(1);
            let mut frame = 0u64;
            b.iter(|| {
                frame += 1;
                let mut ctx = MotionContext::new(frame as f64 * 16.6, frame, &mut rng);
                black_box(field.step(&config, &mut ctx))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
