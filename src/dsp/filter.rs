use std::f32::consts::PI;

/*
| response  | passes          | rejects      |
| --------- | --------------- | ------------ |
| low-pass  | below cutoff    | above cutoff |
| band-pass | around cutoff   | both sides   |
| high-pass | above cutoff    | below cutoff |

All three come out of the same two integrators; the voice only listens to the
low-pass tap. Damping is k = 1/Q, so Q = 0.5 gives k = 2: critically damped,
no resonant bump at the cutoff.
*/

/// Integrator memory this small is inaudible; letting it decay further
/// walks into subnormal floats, which are slow and never quite reach zero.
const DENORMAL_FLOOR: f32 = 1e-20;

#[inline]
fn flush_denormal(x: f32) -> f32 {
    if x.abs() < DENORMAL_FLOOR {
        0.0
    } else {
        x
    }
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

/// Topology-preserving-transform state-variable filter.
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub q: f32,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32, q: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q,
        }
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        // keep the prewarp below Nyquist, tan() blows up at fs/2
        let cutoff = self.cutoff_hz.clamp(10.0, sample_rate * 0.49);
        (PI * cutoff / sample_rate).tan()
    }

    #[inline]
    fn damping(&self) -> f32 {
        1.0 / self.q.max(0.01)
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = self.compute_g(sample_rate);
        let k = self.damping();

        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, k, g).lowpass;
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::OscillatorBlock;

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer
            .get(skip..)
            .unwrap_or(buffer)
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn filtered_sine_peak(cutoff: f32, freq: f32) -> f32 {
        let sample_rate = 48_000.0;
        let mut osc = OscillatorBlock::sine();
        let mut buffer = vec![0.0f32; 1024];
        osc.render(&mut buffer, freq, sample_rate);

        let mut filter = SVFilter::lowpass(cutoff, 0.5);
        filter.render(&mut buffer, sample_rate);
        peak_after_transient(&buffer)
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0, 0.5);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer, 48_000.0);

        assert!(buffer[511] > 0.99, "got {}", buffer[511]);
    }

    #[test]
    fn test_lowpass_filters_high_freq() {
        // 10x the cutoff
        let peak = filtered_sine_peak(500.0, 5_000.0);
        assert!(
            peak < 0.05,
            "Expected high freq attenuation, got peak: {}",
            peak
        );
    }

    #[test]
    fn test_passes_partials_below_eight_times_fundamental() {
        // the piano voice runs its cutoff at 8f; the 5th partial must survive
        let f = 261.63;
        let peak = filtered_sine_peak(8.0 * f, 5.0 * f);
        assert!(peak > 0.4, "5th partial too attenuated: {}", peak);
    }

    #[test]
    fn test_no_resonant_peak_at_half_q() {
        let peak = filtered_sine_peak(1_000.0, 1_000.0);
        // critically damped: -6 dB at the cutoff, never a boost
        assert!(peak < 0.6, "unexpected resonance: {}", peak);
        assert!(peak > 0.4, "too much attenuation at cutoff: {}", peak);
    }

    #[test]
    fn test_cutoff_above_nyquist_stays_finite() {
        let mut filter = SVFilter::lowpass(40_000.0, 0.5);
        let mut buffer = vec![0.5; 256];
        filter.render(&mut buffer, 44_100.0);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_set_cutoff_affects_filtering() {
        let low = filtered_sine_peak(200.0, 1_000.0);
        let high = filtered_sine_peak(5_000.0, 1_000.0);
        assert!(
            high > low * 2.0,
            "High cutoff should pass more signal: high={}, low={}",
            high,
            low
        );
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = SVFilter::lowpass(1_000.0, 0.5);
        let mut buffer = vec![1.0; 128];
        filter.render(&mut buffer, 48_000.0);

        filter.reset();
        filter.set_cutoff(2_000.0);
        let mut silence = vec![0.0; 16];
        filter.render(&mut silence, 48_000.0);
        assert!(silence.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_ring_down_settles_to_exact_zero() {
        let mut filter = SVFilter::lowpass(1_000.0, 0.5);
        let mut buffer = vec![1.0; 128];
        filter.render(&mut buffer, 48_000.0);

        let mut silence = vec![0.0; 4_800];
        filter.render(&mut silence, 48_000.0);
        assert!(silence[silence.len() - 64..].iter().all(|&s| s == 0.0));
    }
}
