//! Benchmarks for the soft-knee compressor.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::dsp::compressor::Compressor;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_compressor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/compressor");

    for &size in BLOCK_SIZES {
        // Loud enough to sit above the knee most of the time
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.05).sin() * 0.8)
            .collect();

        let mut compressor = Compressor::piano();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("piano", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                compressor.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        // Quiet input stays below the knee
        let quiet: Vec<f32> = input.iter().map(|s| s * 0.01).collect();
        let mut compressor = Compressor::piano();
        let mut buffer = quiet.clone();
        group.bench_with_input(BenchmarkId::new("piano_quiet", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&quiet);
                compressor.render(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
