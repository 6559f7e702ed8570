//! Pipeline driver: runs every stage in order over one voice and one music stem.

use std::path::Path;

use duckmix_spec::{validate_config, MixConfig, ValidationWarning};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::align::{align_lengths, ensure_length};
use crate::buffer::AudioBuffer;
use crate::error::{MixError, MixResult};
use crate::level::amp_to_db;
use crate::master::{normalize_peak, quantize_pcm16, tpdf_dither};
use crate::resample::resample;
use crate::rng::dither_rng;
use crate::wav::{read_wav, WavResult};
use crate::{mixer, multiband, music, sidechain, voice};

/// Summary of one mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixReport {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: usize,
    /// Output length in samples per channel.
    pub samples: usize,
    /// Output length in seconds.
    pub seconds: f64,
    /// Sample rate the voice was loaded at.
    pub voice_source_rate: u32,
    /// Sample rate the music was loaded at.
    pub music_source_rate: u32,
    /// Absolute peak of the clipped mix before normalization.
    pub peak_before_normalization: f64,
    /// Linear gain applied by the normalizer.
    pub normalization_gain: f64,
    /// Deepest music duck (linear).
    pub min_duck_gain: f64,
    /// Average music duck (linear).
    pub mean_duck_gain: f64,
    /// Whether the voice noise gate ran.
    pub gate_applied: bool,
    /// Whether the extra mid-band dip ran.
    pub multiband_applied: bool,
    /// Whether TPDF dither was added.
    pub dither_applied: bool,
}

/// A finished mix.
#[derive(Debug, Clone)]
pub struct MixOutput {
    /// Mastered floating-point mix (normalized and, if enabled, dithered).
    pub buffer: AudioBuffer,
    /// Interleaved 16-bit PCM ready for the container.
    pub pcm: Vec<i16>,
    /// What happened along the way.
    pub report: MixReport,
}

impl MixOutput {
    /// Encodes the PCM as a WAV file.
    pub fn to_wav(&self) -> MixResult<WavResult> {
        WavResult::from_pcm16(
            &self.pcm,
            self.buffer.num_channels() as u16,
            self.buffer.sample_rate(),
        )
    }
}

/// Validates `config`, returning its warnings or a [`MixError::Config`].
pub fn check_config(config: &MixConfig) -> MixResult<Vec<ValidationWarning>> {
    let warnings = validate_config(config)
        .into_result()
        .map_err(|errors| MixError::Config { errors })?;
    for warning in &warnings {
        warn!(code = %warning.code, path = ?warning.path, "{}", warning.message);
    }
    Ok(warnings)
}

/// Loads both stems from disk and mixes them.
///
/// The config is validated before either file is opened.
pub fn mix_files(
    voice_path: impl AsRef<Path>,
    music_path: impl AsRef<Path>,
    config: &MixConfig,
) -> MixResult<MixOutput> {
    check_config(config)?;
    let voice = read_wav(voice_path.as_ref(), "voice")?;
    let music = read_wav(music_path.as_ref(), "music")?;
    info!(
        voice = %voice_path.as_ref().display(),
        music = %music_path.as_ref().display(),
        "stems loaded"
    );
    run(voice, music, config)
}

/// Mixes two in-memory stems.
pub fn mix_buffers(
    voice: &AudioBuffer,
    music: &AudioBuffer,
    config: &MixConfig,
) -> MixResult<MixOutput> {
    check_config(config)?;
    run(voice.clone(), music.clone(), config)
}

fn run(voice: AudioBuffer, music: AudioBuffer, config: &MixConfig) -> MixResult<MixOutput> {
    let target_rate = config.master.sample_rate;
    let voice_source_rate = voice.sample_rate();
    let music_source_rate = music.sample_rate();

    let mut voice = resample(&voice, target_rate)?;
    let mut music = resample(&music, target_rate)?;
    let len = align_lengths(&mut voice, &mut music);
    debug!(
        stage = "align",
        samples = len,
        voice_channels = voice.num_channels(),
        music_channels = music.num_channels(),
        "stems aligned"
    );

    let voice = voice::preprocess(&voice, &config.voice);
    let music = music::preprocess(&music, &config.music);

    let side = sidechain::compute(&voice.to_mono(), &config.duck, target_rate);
    ensure_length(
        "sidechain",
        len,
        &[
            ("voice", voice.len()),
            ("music", music.len()),
            ("gain curve", side.gain.len()),
            ("envelope", side.envelope.len()),
        ],
    )?;
    let mut ducked = sidechain::apply_gain_curve(&music, &side.gain)?;
    debug!(
        stage = "sidechain",
        min_gain_db = amp_to_db(side.min_gain()),
        mean_gain = side.mean_gain(),
        "music ducked"
    );

    let multiband_applied = config.multiband.is_active();
    if multiband_applied {
        ducked = multiband::apply(
            &ducked,
            &side.envelope,
            config.duck.threshold_db,
            &config.multiband,
        )?;
        debug!(
            stage = "multiband",
            center_hz = config.multiband.center_hz,
            max_dip_db = config.multiband.max_dip_db,
            "mid band dipped"
        );
    }

    let mut mixed = mixer::mix(&voice, &ducked)?;
    let norm = normalize_peak(&mut mixed, config.master.peak_dbfs);
    debug!(
        stage = "normalize",
        peak_before = norm.peak_before,
        gain = norm.gain,
        "peak normalized"
    );

    if config.master.dither {
        tpdf_dither(&mut mixed, &mut dither_rng(config.master.dither_seed));
    }
    let pcm = quantize_pcm16(&mixed);

    let report = MixReport {
        sample_rate: mixed.sample_rate(),
        channels: mixed.num_channels(),
        samples: mixed.len(),
        seconds: mixed.duration_seconds(),
        voice_source_rate,
        music_source_rate,
        peak_before_normalization: norm.peak_before,
        normalization_gain: norm.gain,
        min_duck_gain: side.min_gain(),
        mean_duck_gain: side.mean_gain(),
        gate_applied: config.voice.gate.enable,
        multiband_applied,
        dither_applied: config.master.dither,
    };
    info!(
        samples = report.samples,
        channels = report.channels,
        sample_rate = report.sample_rate,
        "mix complete"
    );

    Ok(MixOutput {
        buffer: mixed,
        pcm,
        report,
    })
}
