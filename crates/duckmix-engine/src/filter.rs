//! Biquad filter implementations.
//!
//! Highpass, lowpass, bandpass, and peaking EQ sections using the Audio EQ
//! Cookbook formulas. Every section runs forward from zero state, so applying
//! a filter to a buffer never changes its length.

use std::f64::consts::PI;

use duckmix_spec::{FilterKind, FilterSpec};

use crate::buffer::AudioBuffer;

/// Biquad filter coefficients, normalized by `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Intermediate terms shared by every cookbook design.
struct Prewarp {
    cos_omega: f64,
    alpha: f64,
}

impl Prewarp {
    fn new(frequency: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate;
        Self {
            cos_omega: omega.cos(),
            alpha: omega.sin() / (2.0 * q),
        }
    }
}

impl BiquadCoeffs {
    fn normalized(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Self {
            b0: b[0] / a0,
            b1: b[1] / a0,
            b2: b[2] / a0,
            a1: a[1] / a0,
            a2: a[2] / a0,
        }
    }

    /// Creates lowpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor, 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let Prewarp { cos_omega, alpha } = Prewarp::new(cutoff, q, sample_rate);
        let side = (1.0 - cos_omega) / 2.0;
        Self::normalized(
            [side, 1.0 - cos_omega, side],
            [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
        )
    }

    /// Creates highpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor, 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let Prewarp { cos_omega, alpha } = Prewarp::new(cutoff, q, sample_rate);
        let side = (1.0 + cos_omega) / 2.0;
        Self::normalized(
            [side, -(1.0 + cos_omega), side],
            [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
        )
    }

    /// Creates bandpass filter coefficients with 0 dB gain at the center.
    ///
    /// # Arguments
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor (bandwidth = center / Q)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        let Prewarp { cos_omega, alpha } = Prewarp::new(center, q, sample_rate);
        Self::normalized(
            [alpha, 0.0, -alpha],
            [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
        )
    }

    /// Creates a peaking EQ filter.
    ///
    /// # Arguments
    /// * `frequency` - Center frequency in Hz
    /// * `q` - Q factor
    /// * `db_gain` - Gain in dB (positive for boost, negative for cut)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn peaking_eq(frequency: f64, q: f64, db_gain: f64, sample_rate: f64) -> Self {
        let a = 10.0_f64.powf(db_gain / 40.0);
        let Prewarp { cos_omega, alpha } = Prewarp::new(frequency, q, sample_rate);
        Self::normalized(
            [1.0 + alpha * a, -2.0 * cos_omega, 1.0 - alpha * a],
            [1.0 + alpha / a, -2.0 * cos_omega, 1.0 - alpha / a],
        )
    }

    /// Designs the section described by a [`FilterSpec`].
    pub fn from_spec(spec: &FilterSpec, sample_rate: f64) -> Self {
        match spec.kind {
            FilterKind::Highpass => Self::highpass(spec.frequency, spec.q, sample_rate),
            FilterKind::Lowpass => Self::lowpass(spec.frequency, spec.q, sample_rate),
            FilterKind::Bandpass => Self::bandpass(spec.frequency, spec.q, sample_rate),
            FilterKind::PeakingEq => {
                Self::peaking_eq(spec.frequency, spec.q, spec.gain_db, sample_rate)
            }
        }
    }

    /// Magnitude response in dB at `frequency`.
    pub fn response_db(&self, frequency: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * frequency / sample_rate;
        let (c1, s1) = (w.cos(), w.sin());
        let (c2, s2) = ((2.0 * w).cos(), (2.0 * w).sin());
        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);
        let mag2 = (num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im);
        10.0 * mag2.log10()
    }
}

/// Biquad filter state (direct form I).
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with zeroed state.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Runs `samples` through `stages` fresh copies of one section.
pub fn filter_samples(samples: &[f64], coeffs: BiquadCoeffs, stages: usize) -> Vec<f64> {
    let mut out = samples.to_vec();
    for _ in 0..stages {
        BiquadFilter::new(coeffs).process_buffer(&mut out);
    }
    out
}

/// Applies one filter section to every channel of `buffer`.
pub fn apply_filter(buffer: &AudioBuffer, spec: &FilterSpec) -> AudioBuffer {
    apply_cascade(buffer, spec, 1)
}

/// Applies `stages` identical sections in series to every channel.
///
/// Each channel gets its own filter state.
pub fn apply_cascade(buffer: &AudioBuffer, spec: &FilterSpec, stages: usize) -> AudioBuffer {
    let coeffs = BiquadCoeffs::from_spec(spec, buffer.sample_rate() as f64);
    buffer.map_channels(|channel| filter_samples(channel, coeffs, stages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckmix_spec::BUTTERWORTH_Q;

    const SR: f64 = 48000.0;

    fn sine(freq: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / SR).sin())
            .collect()
    }

    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let out = filter_samples(&vec![1.0; 2000], BiquadCoeffs::lowpass(1000.0, BUTTERWORTH_Q, SR), 1);
        assert!((out[1999] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let out = filter_samples(&vec![1.0; 20000], BiquadCoeffs::highpass(80.0, BUTTERWORTH_Q, SR), 2);
        assert!(out[19999].abs() < 1e-3);
    }

    #[test]
    fn test_butterworth_cutoff_is_minus_3db() {
        let hp = BiquadCoeffs::highpass(80.0, BUTTERWORTH_Q, SR);
        assert!((hp.response_db(80.0, SR) + 3.01).abs() < 0.05);
        let lp = BiquadCoeffs::lowpass(12000.0, BUTTERWORTH_Q, SR);
        assert!((lp.response_db(12000.0, SR) + 3.01).abs() < 0.05);
    }

    #[test]
    fn test_bandpass_unity_at_center() {
        let bp = BiquadCoeffs::bandpass(400.0, 1.0, SR);
        assert!(bp.response_db(400.0, SR).abs() < 1e-6);
        assert!(bp.response_db(4000.0, SR) < -15.0);
    }

    #[test]
    fn test_peaking_eq_gain_at_center() {
        let eq = BiquadCoeffs::peaking_eq(3000.0, 1.1, -4.0, SR);
        assert!((eq.response_db(3000.0, SR) + 4.0).abs() < 1e-6);
        assert!(eq.response_db(100.0, SR).abs() < 0.1);
    }

    #[test]
    fn test_cascade_attenuates_more_than_single_stage() {
        let spec = FilterSpec::highpass(200.0);
        let input = AudioBuffer::mono(sine(50.0, 48000), 48000);
        let single = apply_filter(&input, &spec);
        let double = apply_cascade(&input, &spec, 2);
        let tail = 24000..48000;
        assert!(rms(&double.channel(0)[tail.clone()]) < rms(&single.channel(0)[tail]));
    }

    #[test]
    fn test_filter_preserves_length_and_channels() {
        let input = AudioBuffer::stereo(sine(440.0, 1000), sine(660.0, 1000), 48000).unwrap();
        let out = apply_cascade(&input, &FilterSpec::lowpass(12000.0), 2);
        assert_eq!(out.len(), 1000);
        assert_eq!(out.num_channels(), 2);
        assert_eq!(out.sample_rate(), 48000);
    }

    #[test]
    fn test_channels_are_filtered_independently() {
        let left = sine(440.0, 500);
        let input = AudioBuffer::stereo(left.clone(), vec![0.0; 500], 48000).unwrap();
        let out = apply_filter(&input, &FilterSpec::peaking_eq(3000.0, 1.1, -4.0));
        let alone = apply_filter(&AudioBuffer::mono(left, 48000), &FilterSpec::peaking_eq(3000.0, 1.1, -4.0));
        assert_eq!(out.channel(0), alone.channel(0));
        assert!(out.channel(1).iter().all(|&s| s == 0.0));
    }
}
