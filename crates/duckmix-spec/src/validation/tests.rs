//! Validation tests.

use pretty_assertions::assert_eq;

use super::*;

fn codes_at(result: &ValidationResult, path: &str) -> Vec<ErrorCode> {
    result
        .errors
        .iter()
        .filter(|e| e.path.as_deref() == Some(path))
        .map(|e| e.code)
        .collect()
}

#[test]
fn test_default_config_is_valid() {
    let result = validate_config(&MixConfig::default());
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_sample_rate_bounds() {
    let mut config = MixConfig::default();
    config.master.sample_rate = 4000;
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "master.sample_rate"),
        vec![ErrorCode::InvalidSampleRate]
    );
}

#[test]
fn test_positive_peak_target_rejected() {
    let mut config = MixConfig::default();
    config.master.peak_dbfs = 0.5;
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "master.peak_dbfs"),
        vec![ErrorCode::InvalidPeakTarget]
    );
}

#[test]
fn test_ratio_below_one_rejected() {
    let mut config = MixConfig::default();
    config.duck.ratio = 0.5;
    config.voice.gate.ratio = 0.0;
    let result = validate_config(&config);
    assert_eq!(codes_at(&result, "duck.ratio"), vec![ErrorCode::InvalidRatio]);
    assert_eq!(
        codes_at(&result, "voice.gate.ratio"),
        vec![ErrorCode::InvalidRatio]
    );
}

#[test]
fn test_negative_windows_rejected() {
    let mut config = MixConfig::default();
    config.voice.gate.window_ms = -30.0;
    config.duck.attack_ms = 0.0;
    config.duck.release_ms = f64::NAN;
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "voice.gate.window_ms"),
        vec![ErrorCode::InvalidTimeConstant]
    );
    assert_eq!(
        codes_at(&result, "duck.attack_ms"),
        vec![ErrorCode::InvalidTimeConstant]
    );
    assert_eq!(
        codes_at(&result, "duck.release_ms"),
        vec![ErrorCode::InvalidTimeConstant]
    );
}

#[test]
fn test_filter_above_nyquist_rejected() {
    let mut config = MixConfig::default();
    config.master.sample_rate = 22050;
    // 12 kHz lowpass default sits above 11.025 kHz Nyquist
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "music.lowpass.frequency"),
        vec![ErrorCode::InvalidFrequency]
    );
}

#[test]
fn test_low_sample_rate_names_filters_to_lower() {
    let mut config = MixConfig::default();
    config.master.sample_rate = 12000;
    let result = validate_config(&config);
    let paths: Vec<_> = result.errors.iter().filter_map(|e| e.path.as_deref()).collect();
    assert_eq!(paths, vec!["voice.de_ess.frequency", "music.lowpass.frequency"]);
    assert!(result.errors[1]
        .message
        .contains("lower music.lowpass.frequency or raise master.sample_rate"));

    config.voice.de_ess.frequency = 5000.0;
    config.music.lowpass.frequency = 5500.0;
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_filter_kind_mismatch() {
    let mut config = MixConfig::default();
    config.music.highpass = FilterSpec::lowpass(70.0);
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "music.highpass.kind"),
        vec![ErrorCode::FilterKindMismatch]
    );
}

#[test]
fn test_gate_floor_must_not_boost() {
    let mut config = MixConfig::default();
    config.voice.gate.floor_db = 3.0;
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "voice.gate.floor_db"),
        vec![ErrorCode::InvalidGateFloor]
    );
}

#[test]
fn test_multiband_paths_use_config_field_names() {
    let mut config = MixConfig::default();
    config.multiband.center_hz = -1.0;
    config.multiband.q = 0.0;
    config.multiband.max_dip_db = -2.0;
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "multiband.center_hz"),
        vec![ErrorCode::InvalidFrequency]
    );
    assert_eq!(codes_at(&result, "multiband.q"), vec![ErrorCode::InvalidQ]);
    assert_eq!(
        codes_at(&result, "multiband.max_dip_db"),
        vec![ErrorCode::InvalidDip]
    );
}

#[test]
fn test_fades_and_gain() {
    let mut config = MixConfig::default();
    config.music.fade_in_s = -0.1;
    config.music.gain = f64::INFINITY;
    let result = validate_config(&config);
    assert_eq!(
        codes_at(&result, "music.fade_in_s"),
        vec![ErrorCode::InvalidFade]
    );
    assert_eq!(codes_at(&result, "music.gain"), vec![ErrorCode::InvalidGain]);
}

#[test]
fn test_all_errors_collected() {
    let mut config = MixConfig::default();
    config.duck.ratio = 0.0;
    config.music.eq.q = -1.0;
    config.master.peak_dbfs = 6.0;
    let result = validate_config(&config);
    assert_eq!(result.errors.len(), 3);
}

#[test]
fn test_warnings_do_not_fail() {
    let mut config = MixConfig::default();
    config.music.gain = 1.5;
    config.duck.ratio = 1.0;
    config.master.dither = false;
    let result = validate_config(&config);
    assert!(result.is_ok());

    let codes: Vec<WarningCode> = result.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        vec![
            WarningCode::MusicGainBoost,
            WarningCode::DuckingInactive,
            WarningCode::DitherDisabled,
        ]
    );
}
