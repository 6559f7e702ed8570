//! Final gain staging: peak normalization, TPDF dither, 16-bit quantization.

use rand::Rng;

use crate::buffer::AudioBuffer;
use crate::level::db_to_amp;

/// One least-significant bit of 16-bit PCM, relative to full scale.
pub const LSB_16: f64 = 1.0 / 32768.0;

/// Scale factor from [-1, 1] to signed 16-bit.
pub const PCM16_SCALE: f64 = 32767.0;

/// What peak normalization did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Absolute peak before scaling.
    pub peak_before: f64,
    /// Linear gain that was applied (1.0 when the buffer was silent).
    pub gain: f64,
}

/// Scales `buffer` so its absolute peak equals `target_dbfs`.
///
/// A silent buffer is left untouched.
pub fn normalize_peak(buffer: &mut AudioBuffer, target_dbfs: f64) -> Normalization {
    let peak_before = buffer.peak();
    if peak_before <= 0.0 {
        return Normalization {
            peak_before,
            gain: 1.0,
        };
    }

    let gain = db_to_amp(target_dbfs) / peak_before;
    buffer.scale(gain);
    Normalization { peak_before, gain }
}

/// Adds triangular-PDF noise of +/- 1 LSB and clamps to [-1, 1].
///
/// Noise is drawn frame by frame, channel by channel.
pub fn tpdf_dither<R: Rng>(buffer: &mut AudioBuffer, rng: &mut R) {
    let len = buffer.len();
    let num_channels = buffer.num_channels();
    let noise: Vec<f64> = (0..len * num_channels)
        .map(|_| {
            let u1: f64 = rng.gen();
            let u2: f64 = rng.gen();
            (u1 - 0.5 + u2 - 0.5) * LSB_16
        })
        .collect();

    for (ch, channel) in buffer.channels_mut().enumerate() {
        for (i, sample) in channel.iter_mut().enumerate() {
            *sample = (*sample + noise[i * num_channels + ch]).clamp(-1.0, 1.0);
        }
    }
}

/// Converts one sample to 16-bit PCM, clipping to full scale.
#[inline]
pub fn quantize_sample(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * PCM16_SCALE).round() as i16
}

/// Quantizes `buffer` to interleaved 16-bit PCM.
pub fn quantize_pcm16(buffer: &AudioBuffer) -> Vec<i16> {
    buffer.interleave().into_iter().map(quantize_sample).collect()
}
