//! Voice preprocessing: rumble filter, de-esser, and noise gate.

use duckmix_spec::{GateParams, VoiceConfig};
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::envelope::{follow, ms_to_samples};
use crate::filter::{apply_cascade, apply_filter};
use crate::level::{amp_to_db, db_to_amp};

/// Number of cascaded highpass sections on the voice.
pub const VOICE_HIGHPASS_STAGES: usize = 2;

/// Computes the per-sample gate gain for a mono voice signal.
///
/// `gain_db = max(floor_db, -max(0, threshold_db - env_db) / ratio)`, so the
/// gate never attenuates below `floor_db` and leaves signal above the
/// threshold untouched.
pub fn gate_gain(voice_mono: &[f64], params: &GateParams, sample_rate: u32) -> Vec<f64> {
    follow(voice_mono, ms_to_samples(params.window_ms, sample_rate))
        .into_iter()
        .map(|env| {
            let under = (params.threshold_db - amp_to_db(env)).max(0.0);
            db_to_amp((-under / params.ratio).max(params.floor_db))
        })
        .collect()
}

/// Applies the noise gate to every channel, keyed on the channel average.
pub fn apply_gate(voice: &AudioBuffer, params: &GateParams) -> AudioBuffer {
    let gain = gate_gain(&voice.to_mono(), params, voice.sample_rate());
    voice.map_channels(|channel| channel.iter().zip(&gain).map(|(s, g)| s * g).collect())
}

/// Runs the full voice chain: highpass x2, de-ess EQ, then the optional gate.
pub fn preprocess(voice: &AudioBuffer, config: &VoiceConfig) -> AudioBuffer {
    let filtered = apply_cascade(voice, &config.highpass, VOICE_HIGHPASS_STAGES);
    let de_essed = apply_filter(&filtered, &config.de_ess);

    if !config.gate.enable {
        debug!(stage = "voice", gate = false, "voice preprocessed");
        return de_essed;
    }

    let gated = apply_gate(&de_essed, &config.gate);
    debug!(
        stage = "voice",
        gate = true,
        threshold_db = config.gate.threshold_db,
        floor_db = config.gate.floor_db,
        "voice preprocessed"
    );
    gated
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 48000;

    #[test]
    fn test_gate_passes_signal_above_threshold() {
        let gain = gate_gain(&vec![0.5; 4800], &GateParams::default(), SR);
        assert!(gain.iter().all(|&g| g == 1.0));
    }

    #[test]
    fn test_gate_never_cuts_below_floor() {
        let params = GateParams::default();
        let gain = gate_gain(&vec![0.0; 4800], &params, SR);
        let floor = db_to_amp(params.floor_db);
        assert!(gain.iter().all(|&g| (g - floor).abs() < 1e-12));
    }

    #[test]
    fn test_gate_attenuation_is_proportional_below_floor_limit() {
        // -56 dB is 6 dB under a -50 dB threshold: -6 / 1.5 = -4 dB
        let level = db_to_amp(-56.0);
        let gain = gate_gain(&vec![level; 4800], &GateParams::default(), SR);
        let expected = db_to_amp(-4.0);
        assert!((gain[2400] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_apply_gate_uses_channel_average() {
        let params = GateParams::default();
        let voice = AudioBuffer::stereo(vec![0.5; 1000], vec![0.0; 1000], SR).unwrap();
        let gated = apply_gate(&voice, &params);
        // average 0.25 is far above -50 dB
        assert_eq!(gated.channel(0), voice.channel(0));
    }

    #[test]
    fn test_preprocess_removes_dc_and_keeps_shape() {
        let voice = AudioBuffer::mono(vec![0.5; SR as usize], SR);
        let out = preprocess(&voice, &VoiceConfig::default());
        assert_eq!(out.len(), voice.len());
        assert_eq!(out.num_channels(), 1);
        assert!(out.channel(0)[SR as usize - 1].abs() < 1e-3);
    }

    #[test]
    fn test_preprocess_without_gate_skips_gain() {
        let mut config = VoiceConfig::default();
        config.gate.enable = false;
        let quiet = AudioBuffer::mono(
            (0..4800)
                .map(|i| 1e-4 * (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / SR as f64).sin())
                .collect(),
            SR,
        );
        let ungated = preprocess(&quiet, &config);
        config.gate.enable = true;
        let gated = preprocess(&quiet, &config);
        assert!(gated.peak() < ungated.peak());
    }
}
