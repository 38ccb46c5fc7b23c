//! Benchmarks for complete piano voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::{
    piano::{frequency_of, profile_for, Note, PitchClass},
    synth::{AudioSink, Engine, Release, Synthesizer, Voice, VoiceId},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// Notes held for the chord scenarios, low to high.
const CHORD: [(PitchClass, i8); 8] = [
    (PitchClass::C, 3),
    (PitchClass::G, 3),
    (PitchClass::C, 4),
    (PitchClass::E, 4),
    (PitchClass::G, 4),
    (PitchClass::B, 4),
    (PitchClass::D, 5),
    (PitchClass::G, 5),
];

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === SINGLE VOICE ===
        // five partials → gain → lowpass → compressor, held at sustain
        let a4 = Note::new(PitchClass::A, 4);
        let profile = profile_for(a4.octave);
        let mut voice = Voice::piano(VoiceId(0), frequency_of(a4, 0), &profile);
        let mut time = 0.0;
        group.bench_with_input(BenchmarkId::new("piano_voice", size), &size, |b, _| {
            b.iter(|| {
                voice.render(black_box(&mut buffer), SAMPLE_RATE, time);
                time += size as f64 / SAMPLE_RATE as f64;
            })
        });

        // === ENGINE WITH A CHORD ===
        // Voices keep sounding because nothing stops them
        for voices in [1usize, 4, 8] {
            let mut engine = Engine::new(SAMPLE_RATE, 0.7);
            let mut synth = Synthesizer::new(Release::default());
            for &(pitch, octave) in &CHORD[..voices] {
                synth.start_voice(Note::new(pitch, octave), 0, &mut engine);
            }
            assert_eq!(engine.now(), 0.0);

            group.bench_with_input(
                BenchmarkId::new(format!("engine_{voices}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        engine.render_block(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
