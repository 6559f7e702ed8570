//! Mix command implementation
//!
//! Loads the config, applies flag overrides, mixes both stems, and writes the
//! mastered WAV. The output file is only written once the whole mix succeeded.

use anyhow::{Context, Result};
use colored::Colorize;
use duckmix_engine::wav::write_wav_file;
use duckmix_engine::{mix_files, MixReport};
use duckmix_spec::{validate_config, MixConfig, ValidationWarning};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    input_error_to_json, mix_error_to_json, validation_warning_to_json, MixOutput, MixResult,
};
use crate::input::{load_config, LoadResult};
use crate::overrides::MixOverrides;

/// Paths for one `duckmix mix` invocation.
#[derive(Debug, Clone, Copy)]
pub struct MixPaths<'a> {
    /// Narration WAV
    pub voice: &'a str,
    /// Music WAV
    pub music: &'a str,
    /// Output WAV
    pub out: &'a str,
    /// Optional JSON config
    pub config: Option<&'a str>,
}

/// Run the mix command
///
/// # Returns
/// Exit code: 0 if the mix was written, 1 otherwise
pub fn run(paths: MixPaths<'_>, overrides: &MixOverrides, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(paths, overrides)
    } else {
        run_human(paths, overrides)
    }
}

/// Defaults, then the config file, then flags.
fn resolve_config(
    config_path: Option<&str>,
    overrides: &MixOverrides,
) -> Result<LoadResult, crate::input::InputError> {
    let mut loaded = load_config(config_path.map(Path::new))?;
    overrides.apply(&mut loaded.config);
    Ok(loaded)
}

fn config_warnings(config: &MixConfig) -> Vec<ValidationWarning> {
    validate_config(config).warnings
}

/// Run mix with human-readable (colored) output
fn run_human(paths: MixPaths<'_>, overrides: &MixOverrides) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Voice:".cyan().bold(), paths.voice);
    println!("{} {}", "Music:".cyan().bold(), paths.music);

    let LoadResult {
        config,
        source_hash,
    } = resolve_config(paths.config, overrides).context("Failed to load mix config")?;
    if let (Some(path), Some(hash)) = (paths.config, &source_hash) {
        println!("{} {} ({})", "Config:".dimmed(), path, &hash[..16]);
    }

    for warning in config_warnings(&config) {
        let location = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            location.dimmed(),
            warning.message
        );
    }

    let output = mix_files(paths.voice, paths.music, &config).context("Mix failed")?;
    let wav = output.to_wav().context("Failed to encode output")?;
    write_wav_file(paths.out, &wav)
        .with_context(|| format!("Failed to write output: {}", paths.out))?;

    print_report(&output.report);
    println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);
    println!(
        "{} {} ({}ms)",
        "Wrote".green().bold(),
        paths.out,
        start.elapsed().as_millis()
    );

    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &MixReport) {
    println!(
        "{} {} Hz, {} ch, {} samples ({:.2}s)",
        "Output:".dimmed(),
        report.sample_rate,
        report.channels,
        report.samples,
        report.seconds
    );
    if report.voice_source_rate != report.sample_rate
        || report.music_source_rate != report.sample_rate
    {
        println!(
            "{} voice {} Hz, music {} Hz",
            "Resampled from:".dimmed(),
            report.voice_source_rate,
            report.music_source_rate
        );
    }
    println!(
        "{} min {:.1} dB, mean {:.1} dB",
        "Ducking:".dimmed(),
        20.0 * report.min_duck_gain.max(f64::MIN_POSITIVE).log10(),
        20.0 * report.mean_duck_gain.max(f64::MIN_POSITIVE).log10()
    );
    println!(
        "{} peak {:.4} -> gain {:.4}",
        "Normalize:".dimmed(),
        report.peak_before_normalization,
        report.normalization_gain
    );

    let on_off = |on: bool| if on { "on".green() } else { "off".dimmed() };
    println!(
        "{} gate {}, multiband {}, dither {}",
        "Stages:".dimmed(),
        on_off(report.gate_applied),
        on_off(report.multiband_applied),
        on_off(report.dither_applied)
    );
}

/// Run mix with machine-readable JSON output
fn run_json(paths: MixPaths<'_>, overrides: &MixOverrides) -> Result<ExitCode> {
    let (output, code) = mix_to_json(paths, overrides);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

fn mix_to_json(paths: MixPaths<'_>, overrides: &MixOverrides) -> (MixOutput, ExitCode) {
    let failure = |errors, warnings| (MixOutput::failure(errors, warnings), ExitCode::from(1));

    let LoadResult {
        config,
        source_hash,
    } = match resolve_config(paths.config, overrides) {
        Ok(loaded) => loaded,
        Err(e) => return failure(vec![input_error_to_json(&e)], Vec::new()),
    };

    let warnings: Vec<_> = config_warnings(&config)
        .iter()
        .map(validation_warning_to_json)
        .collect();

    let output = match mix_files(paths.voice, paths.music, &config) {
        Ok(output) => output,
        Err(e) => return failure(mix_error_to_json(&e), warnings),
    };
    let wav = match output.to_wav() {
        Ok(wav) => wav,
        Err(e) => return failure(mix_error_to_json(&e), warnings),
    };
    if let Err(e) = write_wav_file(paths.out, &wav) {
        return failure(mix_error_to_json(&e), warnings);
    }

    let result = MixResult {
        voice: paths.voice.to_string(),
        music: paths.music.to_string(),
        out: paths.out.to_string(),
        pcm_hash: wav.pcm_hash,
        config_hash: source_hash,
        report: output.report,
    };
    (MixOutput::success(result, warnings), ExitCode::SUCCESS)
}
