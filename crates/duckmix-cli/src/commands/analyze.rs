//! Analyze command implementation
//!
//! Reports how a music bed's energy is spread across the spectrum, and how
//! much of it sits where it would mask speech.

use anyhow::{Context, Result};
use colored::Colorize;
use duckmix_engine::analysis::{band_energy, BandEnergy};
use duckmix_engine::wav::read_wav;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, mix_error_to_json, AnalyzeOutput, AnalyzeResult, JsonError};

/// Mask index above which a bed is flagged as competing with narration.
pub const MASK_WARNING_INDEX: f64 = 0.25;

/// Run the analyze command
///
/// # Arguments
/// * `input_path` - Path to the WAV to analyze
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path)
    } else {
        run_human(input_path)
    }
}

fn analyze(input_path: &str) -> Result<AnalyzeResult, Vec<JsonError>> {
    let path = Path::new(input_path);
    let data = fs::read(path).map_err(|e| {
        vec![JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(input_path)]
    })?;
    let input_hash = blake3::hash(&data).to_hex().to_string();

    let buffer = read_wav(path, "music").map_err(|e| mix_error_to_json(&e))?;
    Ok(AnalyzeResult {
        input: input_path.to_string(),
        input_hash,
        sample_rate: buffer.sample_rate(),
        channels: buffer.num_channels(),
        seconds: buffer.duration_seconds(),
        bands: band_energy(&buffer),
    })
}

/// Run analyze with human-readable (colored) output
fn run_human(input_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Analyzing:".cyan().bold(), input_path);

    let result = analyze(input_path)
        .map_err(|errors| {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            anyhow::anyhow!(messages.join("; "))
        })
        .with_context(|| format!("Failed to analyze {}", input_path))?;

    println!(
        "{} {} Hz, {} ch, {:.2}s",
        "Format:".dimmed(),
        result.sample_rate,
        result.channels,
        result.seconds
    );
    println!("{} {}", "Hash:".dimmed(), &result.input_hash[..16]);
    print_bands(&result.bands);

    Ok(ExitCode::SUCCESS)
}

fn print_bands(bands: &BandEnergy) {
    println!();
    for (label, share) in [
        ("low      20-200 Hz", bands.low),
        ("low-mid  200-2k Hz", bands.low_mid),
        ("mid      2k-5k Hz ", bands.mid),
        ("high     5k-12k Hz", bands.high),
        ("air      12k+ Hz  ", bands.air),
    ] {
        println!("  {} {:>6.1}%", label, share * 100.0);
    }
    println!();
    println!("{} {:.0} Hz", "Centroid:".dimmed(), bands.centroid_hz);

    let index = format!("{:.3}", bands.mid_mask_index);
    if bands.mid_mask_index > MASK_WARNING_INDEX {
        println!(
            "{} {} {}",
            "Mask index:".dimmed(),
            index.yellow(),
            "(likely to compete with speech)".yellow()
        );
    } else {
        println!("{} {}", "Mask index:".dimmed(), index.green());
    }
}

/// Run analyze with machine-readable JSON output
fn run_json(input_path: &str) -> Result<ExitCode> {
    let (output, code) = match analyze(input_path) {
        Ok(result) => (AnalyzeOutput::success(result), ExitCode::SUCCESS),
        Err(errors) => (AnalyzeOutput::failure(errors), ExitCode::from(1)),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::tempdir;

    #[test]
    fn test_analyze_reports_format_and_bands() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bed.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..44100 {
            let v = 0.5 * (2.0 * std::f64::consts::PI * 3000.0 * i as f64 / 44100.0).sin();
            writer.write_sample((v * 32767.0) as i16).unwrap();
            writer.write_sample((v * 32767.0) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let result = analyze(path.to_str().unwrap()).unwrap();
        assert_eq!(result.sample_rate, 44100);
        assert_eq!(result.channels, 2);
        assert!(result.bands.mid_mask_index > MASK_WARNING_INDEX);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let errors = analyze("/nonexistent/bed.wav").unwrap_err();
        assert_eq!(errors[0].code, "CLI_001");
    }

    #[test]
    fn test_non_wav_is_input_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bed.wav");
        std::fs::write(&path, b"not a wav").unwrap();

        let errors = analyze(path.to_str().unwrap()).unwrap_err();
        assert_eq!(errors[0].code, "MIX_001");
    }
}
