//! Spectral band-energy report for music beds.
//!
//! Used to judge whether a bed will fight the narration: a bed with most of
//! its energy in 2-5 kHz masks speech far more than one sitting below 2 kHz.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::Serialize;

use crate::buffer::AudioBuffer;

const SHARE_EPSILON: f64 = 1e-12;

/// Share of spectral magnitude in each band, plus summary indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandEnergy {
    /// 20-200 Hz.
    pub low: f64,
    /// 200-2000 Hz.
    pub low_mid: f64,
    /// 2-5 kHz.
    pub mid: f64,
    /// 5-12 kHz.
    pub high: f64,
    /// 12 kHz up to 20 kHz or Nyquist, whichever is lower.
    pub air: f64,
    /// Magnitude-weighted mean frequency in Hz.
    pub centroid_hz: f64,
    /// `mid + 0.5 * high`; lower means less competition with speech.
    pub mid_mask_index: f64,
}

/// Periodic Hann window of length `len`.
fn hann(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f64 / len as f64).cos())
        .collect()
}

/// Computes band shares of the mono downmix of `buffer`.
///
/// The whole signal is Hann-windowed and zero-padded to the next power of two
/// before a single FFT. Shares are of summed bin magnitudes.
pub fn band_energy(buffer: &AudioBuffer) -> BandEnergy {
    let mono = buffer.to_mono();
    let sample_rate = buffer.sample_rate() as f64;
    let fft_len = mono.len().max(1).next_power_of_two();

    let mut spectrum: Vec<Complex<f64>> = mono
        .iter()
        .zip(hann(mono.len()))
        .map(|(s, w)| Complex::new(s * w, 0.0))
        .collect();
    spectrum.resize(fft_len, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(fft_len).process(&mut spectrum);

    let bins: Vec<(f64, f64)> = spectrum[..=fft_len / 2]
        .iter()
        .enumerate()
        .map(|(k, c)| (k as f64 * sample_rate / fft_len as f64, c.norm()))
        .collect();

    let total = bins.iter().map(|(_, m)| m).sum::<f64>() + SHARE_EPSILON;
    let share = |lo: f64, hi: f64| {
        bins.iter()
            .filter(|(f, _)| *f >= lo && *f < hi)
            .map(|(_, m)| m)
            .sum::<f64>()
            / total
    };

    let low = share(20.0, 200.0);
    let low_mid = share(200.0, 2000.0);
    let mid = share(2000.0, 5000.0);
    let high = share(5000.0, 12000.0);
    let air = share(12000.0, (sample_rate / 2.0).min(20000.0));
    let centroid_hz = bins.iter().map(|(f, m)| f * m).sum::<f64>() / total;

    BandEnergy {
        low,
        low_mid,
        mid,
        high,
        air,
        centroid_hz,
        mid_mask_index: mid + 0.5 * high,
    }
}
