/*
Register-Dependent Timbre
=========================

Real piano strings behave differently across the keyboard: bass strings are
long and heavy, ring for a long time and carry most of their energy in the
fundamental; treble strings are short, speak quickly and die away fast, with
relatively brighter overtones.

Each voice approximates that with two tables keyed by the sounding octave:

  band   fundamental  2nd   3rd   5th   detune     attack  decay  sustain
  <=2    0.80         0.15  0.08  0.03  0.05       20 ms   150 ms 400 ms
  3      0.70         0.20  0.12  0.05  0.06       15 ms   120 ms 300 ms
  4      0.60         0.25  0.15  0.08  0.07       10 ms   100 ms 250 ms
  5      0.50         0.30  0.18  0.12  0.08        8 ms    80 ms 200 ms
  >=6    0.40         0.35  0.22  0.15  0.10        5 ms    60 ms 150 ms

The envelope has no release: release is spliced in when the key goes up.

  level
  attackLevel ┐   ╱╲
              │  ╱  ╲ (exp)
  decayLevel  │ ╱    ╲___ (exp)
  sustainLvl  │╱         ╲_____________  held until note off
            0 └──────────────────────────→ time
              attack decay  sustain
*/

/// Relative amplitudes of the five voice oscillators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicMix {
    pub fundamental: f32,
    pub second: f32,
    pub third: f32,
    pub fifth: f32,
    /// Weight of the slightly detuned copy of the fundamental.
    pub detune: f32,
}

impl HarmonicMix {
    pub fn total(&self) -> f32 {
        self.fundamental + self.second + self.third + self.fifth + self.detune
    }
}

/// Attack/decay/sustain gain targets. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack: f32,
    pub attack_level: f32,
    pub decay: f32,
    pub decay_level: f32,
    pub sustain: f32,
    pub sustain_level: f32,
}

impl EnvelopeShape {
    /// Seconds from note start until the sustain level is reached.
    pub fn settle_time(&self) -> f32 {
        self.attack + self.decay + self.sustain
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub harmonics: HarmonicMix,
    pub envelope: EnvelopeShape,
}

pub fn profile_for(octave: i8) -> Profile {
    match octave {
        i8::MIN..=2 => Profile {
            harmonics: HarmonicMix {
                fundamental: 0.8,
                second: 0.15,
                third: 0.08,
                fifth: 0.03,
                detune: 0.05,
            },
            envelope: EnvelopeShape {
                attack: 0.02,
                attack_level: 0.9,
                decay: 0.15,
                decay_level: 0.6,
                sustain: 0.4,
                sustain_level: 0.4,
            },
        },
        3 => Profile {
            harmonics: HarmonicMix {
                fundamental: 0.7,
                second: 0.2,
                third: 0.12,
                fifth: 0.05,
                detune: 0.06,
            },
            envelope: EnvelopeShape {
                attack: 0.015,
                attack_level: 0.85,
                decay: 0.12,
                decay_level: 0.55,
                sustain: 0.3,
                sustain_level: 0.35,
            },
        },
        4 => Profile {
            harmonics: HarmonicMix {
                fundamental: 0.6,
                second: 0.25,
                third: 0.15,
                fifth: 0.08,
                detune: 0.07,
            },
            envelope: EnvelopeShape {
                attack: 0.01,
                attack_level: 0.8,
                decay: 0.1,
                decay_level: 0.5,
                sustain: 0.25,
                sustain_level: 0.3,
            },
        },
        5 => Profile {
            harmonics: HarmonicMix {
                fundamental: 0.5,
                second: 0.3,
                third: 0.18,
                fifth: 0.12,
                detune: 0.08,
            },
            envelope: EnvelopeShape {
                attack: 0.008,
                attack_level: 0.75,
                decay: 0.08,
                decay_level: 0.45,
                sustain: 0.2,
                sustain_level: 0.25,
            },
        },
        _ => Profile {
            harmonics: HarmonicMix {
                fundamental: 0.4,
                second: 0.35,
                third: 0.22,
                fifth: 0.15,
                detune: 0.1,
            },
            envelope: EnvelopeShape {
                attack: 0.005,
                attack_level: 0.7,
                decay: 0.06,
                decay_level: 0.4,
                sustain: 0.15,
                sustain_level: 0.2,
            },
        },
    }
}
