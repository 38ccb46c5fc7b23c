//! Benchmarks for parameter automation rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::dsp::automation::ParamTimeline;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_automation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/automation");

    // A piano note: attack, decay, sustain, then a release
    let mut envelope = ParamTimeline::new(0.0);
    envelope.set_value_at_time(0.0, 0.0);
    envelope.linear_ramp_to_value_at_time(1.0, 0.02);
    envelope.exponential_ramp_to_value_at_time(0.6, 0.3);
    envelope.exponential_ramp_to_value_at_time(0.1, 3.0);
    envelope.set_value_at_time(0.4, 1.0);
    envelope.exponential_ramp_to_value_at_time(0.001, 1.3);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Inside the linear attack
        group.bench_with_input(BenchmarkId::new("linear_ramp", size), &size, |b, _| {
            b.iter(|| {
                envelope.render(black_box(&mut buffer), black_box(0.005), SAMPLE_RATE);
            })
        });

        // Inside an exponential segment
        group.bench_with_input(BenchmarkId::new("exponential_ramp", size), &size, |b, _| {
            b.iter(|| {
                envelope.render(black_box(&mut buffer), black_box(0.5), SAMPLE_RATE);
            })
        });

        // After the last event: constant
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                envelope.render(black_box(&mut buffer), black_box(5.0), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
