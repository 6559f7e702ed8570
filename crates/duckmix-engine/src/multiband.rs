//! Extra mid-band dip on the already-ducked music.
//!
//! A bandpass around the speech fundamentals is split off the music, scaled
//! by how far the voice attack envelope sits above the duck threshold, and
//! added back to the remainder.

use duckmix_spec::MultibandParams;

use crate::buffer::AudioBuffer;
use crate::error::{MixError, MixResult};
use crate::filter::{filter_samples, BiquadCoeffs};
use crate::level::{amp_to_db, db_to_amp};

/// Overshoot above threshold (dB) at which the full dip is reached.
pub const FULL_DIP_OVERSHOOT_DB: f64 = 20.0;

/// Per-sample linear gain for the mid band.
///
/// `alpha = clamp((env_db - threshold_db) / 20, 0, 1)` and the band is scaled
/// by `10^(-max_dip_db * alpha / 20)`.
pub fn band_gain(envelope: &[f64], threshold_db: f64, max_dip_db: f64) -> Vec<f64> {
    envelope
        .iter()
        .map(|&env| {
            let alpha = ((amp_to_db(env) - threshold_db) / FULL_DIP_OVERSHOOT_DB).clamp(0.0, 1.0);
            db_to_amp(-max_dip_db * alpha)
        })
        .collect()
}

/// Applies the mid-band dip to every channel of `ducked`.
///
/// `envelope` is the voice attack envelope; it must match the music length.
pub fn apply(
    ducked: &AudioBuffer,
    envelope: &[f64],
    threshold_db: f64,
    params: &MultibandParams,
) -> MixResult<AudioBuffer> {
    if envelope.len() != ducked.len() {
        return Err(MixError::processing(
            "multiband",
            format!(
                "envelope has {} samples but music has {}",
                envelope.len(),
                ducked.len()
            ),
        ));
    }

    let coeffs = BiquadCoeffs::bandpass(params.center_hz, params.q, ducked.sample_rate() as f64);
    let gain = band_gain(envelope, threshold_db, params.max_dip_db);

    Ok(ducked.map_channels(|channel| {
        let mid = filter_samples(channel, coeffs, 1);
        channel
            .iter()
            .zip(&mid)
            .zip(&gain)
            .map(|((&x, &m), &g)| (x - m) + m * g)
            .collect()
    }))
}
