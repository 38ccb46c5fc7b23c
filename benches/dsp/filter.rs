//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::dsp::filter::SVFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Piano voice setting: 8x A4, critically damped
        let mut filter = SVFilter::lowpass(3520.0, 0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        // Cutoff retuned every block, as key tracking does
        let mut filter = SVFilter::lowpass(1000.0, 0.5);
        let mut buffer = input.clone();
        let mut cutoff = 1000.0;
        group.bench_with_input(BenchmarkId::new("lowpass_retuned", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 8000.0 { 1000.0 } else { cutoff * 1.5 };
                filter.set_cutoff(cutoff);
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
