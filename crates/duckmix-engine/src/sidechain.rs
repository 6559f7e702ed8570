//! Sidechain compressor: turns the voice envelope into a music gain curve.

use duckmix_spec::DuckParams;

use crate::buffer::AudioBuffer;
use crate::envelope::{follow, ms_to_samples};
use crate::error::{MixError, MixResult};
use crate::level::{amp_to_db, db_to_amp};

/// Lowest gain the music is ever ducked to.
pub const MIN_DUCK_GAIN: f64 = 0.05;

/// Highest gain applied to the music (never boost).
pub const MAX_DUCK_GAIN: f64 = 1.0;

/// Output of the sidechain stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Sidechain {
    /// Attack envelope of the voice, reused by the multiband ducker.
    pub envelope: Vec<f64>,
    /// Per-sample music gain in [`MIN_DUCK_GAIN`, `MAX_DUCK_GAIN`].
    pub gain: Vec<f64>,
}

impl Sidechain {
    /// Smallest gain in the curve (1.0 for an empty curve).
    pub fn min_gain(&self) -> f64 {
        self.gain.iter().copied().fold(MAX_DUCK_GAIN, f64::min)
    }

    /// Mean gain over the curve (1.0 for an empty curve).
    pub fn mean_gain(&self) -> f64 {
        if self.gain.is_empty() {
            MAX_DUCK_GAIN
        } else {
            self.gain.iter().sum::<f64>() / self.gain.len() as f64
        }
    }
}

/// Static compressor curve: linear gain for each envelope value.
///
/// `reduction_db = max(0, env_db - threshold_db) * (1 - 1/ratio)`.
pub fn reduction_gain(envelope: &[f64], threshold_db: f64, ratio: f64) -> Vec<f64> {
    let slope = 1.0 - 1.0 / ratio;
    envelope
        .iter()
        .map(|&env| {
            let over = (amp_to_db(env) - threshold_db).max(0.0);
            db_to_amp(-over * slope)
        })
        .collect()
}

/// Computes the music gain curve from a mono voice signal.
///
/// The attack envelope is taken over `attack_ms`, mapped through the
/// compressor curve, smoothed over `release_ms`, and clamped.
pub fn compute(voice_mono: &[f64], params: &DuckParams, sample_rate: u32) -> Sidechain {
    let envelope = follow(voice_mono, ms_to_samples(params.attack_ms, sample_rate));
    let raw = reduction_gain(&envelope, params.threshold_db, params.ratio);
    let gain = follow(&raw, ms_to_samples(params.release_ms, sample_rate))
        .into_iter()
        .map(|g| g.clamp(MIN_DUCK_GAIN, MAX_DUCK_GAIN))
        .collect();

    Sidechain { envelope, gain }
}

/// Multiplies every channel of `music` by `gain`.
pub fn apply_gain_curve(music: &AudioBuffer, gain: &[f64]) -> MixResult<AudioBuffer> {
    if gain.len() != music.len() {
        return Err(MixError::processing(
            "sidechain",
            format!(
                "gain curve has {} samples but music has {}",
                gain.len(),
                music.len()
            ),
        ));
    }
    Ok(music.map_channels(|channel| {
        channel.iter().zip(gain).map(|(s, g)| s * g).collect()
    }))
}
