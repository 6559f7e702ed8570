//! Mix configuration validation.
//!
//! Validation runs before any audio is touched. Every problem found is
//! collected with its JSON path so a single run reports all of them.

pub mod common;

#[cfg(test)]
mod tests;

use crate::config::{
    DuckParams, FilterKind, FilterSpec, GateParams, MasterConfig, MixConfig, MultibandParams,
    MusicConfig, VoiceConfig,
};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};

pub use common::{
    validate_at_least, validate_non_negative, validate_positive, validate_range,
    CommonValidationError,
};

/// Lowest accepted target sample rate in Hz.
pub const MIN_SAMPLE_RATE: u32 = 8000;
/// Highest accepted target sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 192_000;
/// Lowest accepted peak target in dBFS.
pub const MIN_PEAK_DBFS: f64 = -60.0;

/// Validates a mix configuration.
///
/// # Example
/// ```
/// use duckmix_spec::{validate_config, MixConfig};
///
/// let result = validate_config(&MixConfig::default());
/// assert!(result.is_ok());
/// ```
pub fn validate_config(config: &MixConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_master(&config.master, &mut result);

    // Filter checks need a Nyquist limit; fall back to the default rate when
    // the configured one was already rejected.
    let nyquist = if result.is_ok() {
        config.nyquist()
    } else {
        MasterConfig::default().sample_rate as f64 / 2.0
    };

    validate_voice(&config.voice, nyquist, &mut result);
    validate_music(&config.music, nyquist, &mut result);
    validate_duck(&config.duck, &mut result);
    validate_multiband(&config.multiband, nyquist, &mut result);

    check_warnings(config, &mut result);

    result
}

fn push(
    result: &mut ValidationResult,
    code: ErrorCode,
    path: &str,
    check: Result<(), CommonValidationError>,
) {
    if let Err(e) = check {
        result.add_error(ValidationError::with_path(code, e.message, path));
    }
}

fn validate_master(master: &MasterConfig, result: &mut ValidationResult) {
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&master.sample_rate) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            format!(
                "sample_rate must be in [{}, {}], got {}",
                MIN_SAMPLE_RATE, MAX_SAMPLE_RATE, master.sample_rate
            ),
            "master.sample_rate",
        ));
    }
    push(
        result,
        ErrorCode::InvalidPeakTarget,
        "master.peak_dbfs",
        validate_range("peak_dbfs", master.peak_dbfs, MIN_PEAK_DBFS, 0.0),
    );
}

/// Validates one filter slot, checking its kind matches what the slot expects.
fn validate_filter(
    spec: &FilterSpec,
    expected: FilterKind,
    nyquist: f64,
    path: &str,
    result: &mut ValidationResult,
) {
    if spec.kind != expected {
        result.add_error(ValidationError::with_path(
            ErrorCode::FilterKindMismatch,
            format!("expected a {} filter, got {}", expected, spec.kind),
            format!("{}.kind", path),
        ));
    }

    let frequency_path = format!("{}.frequency", path);
    push(
        result,
        ErrorCode::InvalidFrequency,
        &frequency_path,
        validate_positive("frequency", spec.frequency),
    );
    if spec.frequency.is_finite() && spec.frequency >= nyquist {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFrequency,
            format!(
                "frequency must be below Nyquist ({} Hz), got {}; lower {} or raise master.sample_rate",
                nyquist, spec.frequency, frequency_path
            ),
            frequency_path,
        ));
    }

    push(
        result,
        ErrorCode::InvalidQ,
        &format!("{}.q", path),
        validate_positive("q", spec.q),
    );

    if !spec.gain_db.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFilterGain,
            format!("gain_db must be finite, got {}", spec.gain_db),
            format!("{}.gain_db", path),
        ));
    }
}

fn validate_gate(gate: &GateParams, result: &mut ValidationResult) {
    if !gate.threshold_db.is_finite() || gate.threshold_db > 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidThreshold,
            format!(
                "threshold_db must be a finite level <= 0 dBFS, got {}",
                gate.threshold_db
            ),
            "voice.gate.threshold_db",
        ));
    }
    push(
        result,
        ErrorCode::InvalidRatio,
        "voice.gate.ratio",
        validate_at_least("ratio", gate.ratio, 1.0),
    );
    if !gate.floor_db.is_finite() || gate.floor_db > 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidGateFloor,
            format!(
                "floor_db must be a finite attenuation <= 0 dB, got {}",
                gate.floor_db
            ),
            "voice.gate.floor_db",
        ));
    }
    push(
        result,
        ErrorCode::InvalidTimeConstant,
        "voice.gate.window_ms",
        validate_positive("window_ms", gate.window_ms),
    );
}

fn validate_voice(voice: &VoiceConfig, nyquist: f64, result: &mut ValidationResult) {
    validate_filter(
        &voice.highpass,
        FilterKind::Highpass,
        nyquist,
        "voice.highpass",
        result,
    );
    validate_filter(
        &voice.de_ess,
        FilterKind::PeakingEq,
        nyquist,
        "voice.de_ess",
        result,
    );
    validate_gate(&voice.gate, result);
}

fn validate_music(music: &MusicConfig, nyquist: f64, result: &mut ValidationResult) {
    validate_filter(
        &music.highpass,
        FilterKind::Highpass,
        nyquist,
        "music.highpass",
        result,
    );
    validate_filter(
        &music.lowpass,
        FilterKind::Lowpass,
        nyquist,
        "music.lowpass",
        result,
    );
    validate_filter(&music.eq, FilterKind::PeakingEq, nyquist, "music.eq", result);

    push(
        result,
        ErrorCode::InvalidFade,
        "music.fade_in_s",
        validate_non_negative("fade_in_s", music.fade_in_s),
    );
    push(
        result,
        ErrorCode::InvalidFade,
        "music.fade_out_s",
        validate_non_negative("fade_out_s", music.fade_out_s),
    );
    push(
        result,
        ErrorCode::InvalidGain,
        "music.gain",
        validate_non_negative("gain", music.gain),
    );
}

fn validate_duck(duck: &DuckParams, result: &mut ValidationResult) {
    if !duck.threshold_db.is_finite() || duck.threshold_db > 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidThreshold,
            format!(
                "threshold_db must be a finite level <= 0 dBFS, got {}",
                duck.threshold_db
            ),
            "duck.threshold_db",
        ));
    }
    push(
        result,
        ErrorCode::InvalidRatio,
        "duck.ratio",
        validate_at_least("ratio", duck.ratio, 1.0),
    );
    push(
        result,
        ErrorCode::InvalidTimeConstant,
        "duck.attack_ms",
        validate_positive("attack_ms", duck.attack_ms),
    );
    push(
        result,
        ErrorCode::InvalidTimeConstant,
        "duck.release_ms",
        validate_positive("release_ms", duck.release_ms),
    );
}

fn validate_multiband(params: &MultibandParams, nyquist: f64, result: &mut ValidationResult) {
    push(
        result,
        ErrorCode::InvalidFrequency,
        "multiband.center_hz",
        validate_positive("center_hz", params.center_hz),
    );
    if params.center_hz.is_finite() && params.center_hz >= nyquist {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFrequency,
            format!(
                "center_hz must be below Nyquist ({} Hz), got {}; lower it or raise master.sample_rate",
                nyquist, params.center_hz
            ),
            "multiband.center_hz",
        ));
    }
    push(
        result,
        ErrorCode::InvalidQ,
        "multiband.q",
        validate_positive("q", params.q),
    );
    push(
        result,
        ErrorCode::InvalidDip,
        "multiband.max_dip_db",
        validate_non_negative("max_dip_db", params.max_dip_db),
    );
}

fn check_warnings(config: &MixConfig, result: &mut ValidationResult) {
    if config.music.gain.is_finite() && config.music.gain > 1.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MusicGainBoost,
            format!("music gain {} boosts the music bed", config.music.gain),
            "music.gain",
        ));
    }
    if config.duck.ratio == 1.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DuckingInactive,
            "duck ratio of 1 never reduces the music",
            "duck.ratio",
        ));
    }
    if !config.master.dither {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DitherDisabled,
            "16-bit output without dither may show quantization distortion",
            "master.dither",
        ));
    }
}
