/*
Dynamics Compressor
===================

A compressor turns loud passages down. Once the input level crosses the
threshold, every extra `ratio` dB in only produces 1 dB out.

  out (dB)
     │                     ╱ ratio 1:1 (bypass)
     │                   ╱
     │                 ╱     ___----- ratio 12:1 above the knee
  T  ┤ ─ ─ ─ ─ ─ ─ ─ ●--''
     │             ╱ ╲
     │           ╱    soft knee, W dB wide, centered on T
     │         ╱
     └─────────┴──────┴─────────→ in (dB)
              T-W/2   T+W/2


Static Curve
------------

With input level x (dB), threshold T, knee width W and ratio R:

    x <  T - W/2          y = x
    x >  T + W/2          y = T + (x - T) / R
    otherwise             y = x + (1/R - 1) * (x - T + W/2)^2 / (2W)

The quadratic joins both straight segments with matching slope, so the
transfer curve has no corner.


Ballistics
----------

Gain reduction (x - y) is smoothed with a one-pole filter whose coefficient
depends on direction:

    coeff = exp(-1 / (time * sample_rate))

    reduction rising  -> attack coefficient  (fast, 3 ms)
    reduction falling -> release coefficient (slow, 250 ms)


Makeup Gain
-----------

A heavily compressed signal comes out much quieter than it went in. The
output is boosted by a fixed amount derived from how much a full-scale
(0 dB) input is reduced:

    makeup_db = 0.6 * (0 - curve(0))

With the piano settings (T = -24, W = 30, R = 12) a 0 dB input comes out at
-22 dB, so the makeup is +13.2 dB.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorSettings {
    pub threshold_db: f32,
    pub knee_db: f32,
    pub ratio: f32,
    pub attack: f32,
    pub release: f32,
}

impl CompressorSettings {
    /// Settings used on every piano voice.
    pub const PIANO: CompressorSettings = CompressorSettings {
        threshold_db: -24.0,
        knee_db: 30.0,
        ratio: 12.0,
        attack: 0.003,
        release: 0.25,
    };

    /// Output level in dB for a steady input level in dB.
    pub fn curve(&self, input_db: f32) -> f32 {
        let t = self.threshold_db;
        let w = self.knee_db;
        let r = self.ratio.max(1.0);

        if w > 0.0 && (input_db - t).abs() * 2.0 <= w {
            let over = input_db - t + w / 2.0;
            input_db + (1.0 / r - 1.0) * over * over / (2.0 * w)
        } else if input_db > t {
            t + (input_db - t) / r
        } else {
            input_db
        }
    }

    pub fn makeup_db(&self) -> f32 {
        0.6 * -self.curve(0.0)
    }
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self::PIANO
    }
}

#[inline]
fn lin_to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-6).log10()
}

#[inline]
fn db_to_lin(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

pub struct Compressor {
    settings: CompressorSettings,
    makeup_db: f32,
    /// Smoothed gain reduction in dB (>= 0).
    reduction_db: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
}

impl Compressor {
    pub fn new(settings: CompressorSettings) -> Self {
        let mut compressor = Self {
            settings,
            makeup_db: settings.makeup_db(),
            reduction_db: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate: 0.0,
        };
        compressor.prepare(48_000.0);
        compressor
    }

    pub fn piano() -> Self {
        Self::new(CompressorSettings::PIANO)
    }

    fn prepare(&mut self, sample_rate: f32) {
        if self.sample_rate == sample_rate {
            return;
        }
        self.sample_rate = sample_rate;
        self.attack_coeff = (-1.0 / (self.settings.attack.max(1e-5) * sample_rate)).exp();
        self.release_coeff = (-1.0 / (self.settings.release.max(1e-5) * sample_rate)).exp();
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let level_db = lin_to_db(input.abs());
        let target = (level_db - self.settings.curve(level_db)).max(0.0);

        let coeff = if target > self.reduction_db {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.reduction_db = coeff * self.reduction_db + (1.0 - coeff) * target;

        input * db_to_lin(self.makeup_db - self.reduction_db)
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        self.prepare(sample_rate);
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    /// Current gain reduction in dB.
    pub fn reduction_db(&self) -> f32 {
        self.reduction_db
    }

    pub fn settings(&self) -> &CompressorSettings {
        &self.settings
    }

    pub fn reset(&mut self) {
        self.reduction_db = 0.0;
    }
}
